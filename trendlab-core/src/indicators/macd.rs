//! MACD — fast EMA minus slow EMA, plus a signal-line EMA of that difference.

use super::ema::ema;

pub struct Macd {
    pub macd_line: Vec<Option<f64>>,
    pub signal_line: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);

    let macd_line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let dense: Vec<f64> = macd_line.iter().filter_map(|v| *v).collect();
    let signal_dense = ema(&dense, signal);

    let first_valid = macd_line.iter().position(|v| v.is_some());
    let mut signal_line = vec![None; values.len()];
    if let Some(start) = first_valid {
        for (offset, value) in signal_dense.into_iter().enumerate() {
            signal_line[start + offset] = value;
        }
    }

    let histogram: Vec<Option<f64>> = macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    Macd { macd_line, signal_line, histogram }
}
