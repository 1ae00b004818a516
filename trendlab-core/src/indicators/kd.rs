//! Stochastic oscillator (%K / %D), the "KD" indicator common in Taiwan technical analysis.

use super::sma::sma;

pub struct Kd {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

pub fn kd(high: &[f64], low: &[f64], close: &[f64], k_period: usize, d_period: usize) -> Kd {
    let n = high.len();
    let mut raw_k = vec![None; n];
    if k_period == 0 || n < k_period || low.len() != n || close.len() != n {
        return Kd { k: raw_k, d: vec![None; n] };
    }

    for i in (k_period - 1)..n {
        let window_high = &high[i + 1 - k_period..=i];
        let window_low = &low[i + 1 - k_period..=i];
        let hh = window_high.iter().cloned().fold(f64::MIN, f64::max);
        let ll = window_low.iter().cloned().fold(f64::MAX, f64::min);
        raw_k[i] = if hh > ll { Some(100.0 * (close[i] - ll) / (hh - ll)) } else { Some(50.0) };
    }

    let dense_k: Vec<f64> = raw_k.iter().filter_map(|v| *v).collect();
    let first_valid = raw_k.iter().position(|v| v.is_some());
    let d_dense = sma(&dense_k, d_period);

    let mut d = vec![None; n];
    if let Some(start) = first_valid {
        for (offset, value) in d_dense.into_iter().enumerate() {
            d[start + offset] = value;
        }
    }

    Kd { k: raw_k, d }
}
