//! Simple Moving Average.
//!
//! SMA[i] = mean(close[i-n+1..=i]). The first n-1 samples have no full
//! window and are undefined.

/// Rolling mean of `closes` over a `period`-sample window.
///
/// Output is index-aligned with the input; warm-up entries are `None`.
/// `period` must be at least 1.
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    debug_assert!(period >= 1, "period must be at least 1");

    let mut values = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        if i + 1 < period {
            values.push(None);
        } else {
            let window = &closes[i + 1 - period..=i];
            values.push(Some(window.iter().sum::<f64>() / period as f64));
        }
    }
    values
}
