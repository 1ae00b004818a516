//! Exponential Moving Average — seeded with an SMA over the first `period` values.

use super::sma::sma_last;

pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if period == 0 || n < period {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = sma_last(&values[..period], period).expect("window just validated");
    result[period - 1] = Some(prev);

    for (i, &value) in values.iter().enumerate().skip(period) {
        prev = alpha * value + (1.0 - alpha) * prev;
        result[i] = Some(prev);
    }
    result
}
