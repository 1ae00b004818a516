//! Average True Range — Wilder-smoothed true range over high/low/close.

pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = high.len();
    let mut result = vec![None; n];
    if period == 0 || n < period + 1 || low.len() != n || close.len() != n {
        return result;
    }

    let true_range = |i: usize| -> f64 {
        let hl = high[i] - low[i];
        let hc = (high[i] - close[i - 1]).abs();
        let lc = (low[i] - close[i - 1]).abs();
        hl.max(hc).max(lc)
    };

    let sum: f64 = (1..=period).map(true_range).sum();
    let mut atr_value = sum / period as f64;
    result[period] = Some(atr_value);

    for i in (period + 1)..n {
        let tr = true_range(i);
        atr_value = (atr_value * (period - 1) as f64 + tr) / period as f64;
        result[i] = Some(atr_value);
    }
    result
}
