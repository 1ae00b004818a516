//! Bollinger Bands — SMA midline plus/minus `num_std` standard deviations.

pub struct Bollinger {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

pub fn bollinger(values: &[f64], period: usize, num_std: f64) -> Bollinger {
    let n = values.len();
    let mut upper = vec![None; n];
    let mut middle = vec![None; n];
    let mut lower = vec![None; n];

    if period == 0 || n < period {
        return Bollinger { upper, middle, lower };
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
        let std_dev = variance.sqrt();
        middle[i] = Some(mean);
        upper[i] = Some(mean + num_std * std_dev);
        lower[i] = Some(mean - num_std * std_dev);
    }

    Bollinger { upper, middle, lower }
}
