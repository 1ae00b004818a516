//! Relative Strength Index with Wilder smoothing.
//! `avg_loss == 0` -> 100; `avg_gain == 0 && avg_loss == 0` -> 50 (no movement).

pub fn rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();

    let mut avg_gain: f64 = changes[..period].iter().filter(|&&c| c > 0.0).sum::<f64>() / period as f64;
    let mut avg_loss: f64 = changes[..period].iter().filter(|&&c| c < 0.0).map(|c| -c).sum::<f64>() / period as f64;
    result[period] = Some(compute_rsi(avg_gain, avg_loss));

    let alpha = 1.0 / period as f64;
    for i in period..changes.len() {
        let gain = changes[i].max(0.0);
        let loss = (-changes[i]).max(0.0);
        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
        result[i + 1] = Some(compute_rsi(avg_gain, avg_loss));
    }
    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
