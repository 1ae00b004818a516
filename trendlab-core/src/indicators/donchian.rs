//! Donchian Channel — highest high / lowest low over `period` bars.

pub struct Donchian {
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

pub fn donchian(high: &[f64], low: &[f64], period: usize) -> Donchian {
    let n = high.len();
    let mut upper = vec![None; n];
    let mut lower = vec![None; n];
    if period == 0 || n < period || low.len() != n {
        return Donchian { upper, lower };
    }

    for i in (period - 1)..n {
        let window_high = &high[i + 1 - period..=i];
        let window_low = &low[i + 1 - period..=i];
        upper[i] = window_high.iter().cloned().fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))));
        lower[i] = window_low.iter().cloned().fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.min(v))));
    }
    Donchian { upper, lower }
}
