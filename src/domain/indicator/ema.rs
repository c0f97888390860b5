//! Exponential Moving Average with adjusted weights.
//!
//! k = 2/(n+1); EMA[i] = sum((1-k)^j * close[i-j]) / sum((1-k)^j) for
//! j in 0..=i. The weighted window grows with the input, so every sample
//! has a value and there is no warm-up gate.

/// Span-based exponentially weighted mean of `closes`.
///
/// Output is index-aligned with the input and defined from the first
/// sample. `period` must be at least 1.
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<f64> {
    debug_assert!(period >= 1, "period must be at least 1");

    let k = 2.0 / (period as f64 + 1.0);
    let mut values = Vec::with_capacity(closes.len());
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for &close in closes {
        numerator = close + (1.0 - k) * numerator;
        denominator = 1.0 + (1.0 - k) * denominator;
        values.push(numerator / denominator);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ema_first_value_is_first_close() {
        let values = calculate_ema(&[42.0, 50.0, 60.0], 3);
        assert_relative_eq!(values[0], 42.0);
    }

    #[test]
    fn ema_adjusted_weights() {
        // period 3 → k = 0.5; weights 1, 0.5, 0.25 over the newest-first
        // window.
        let values = calculate_ema(&[10.0, 20.0, 30.0], 3);
        assert_relative_eq!(values[0], 10.0);
        assert_relative_eq!(values[1], (20.0 + 0.5 * 10.0) / 1.5);
        assert_relative_eq!(values[2], (30.0 + 0.5 * 20.0 + 0.25 * 10.0) / 1.75);
    }

    #[test]
    fn ema_period_1_is_identity() {
        let closes = [10.0, 20.0, 30.0];
        let values = calculate_ema(&closes, 1);
        for (value, close) in values.iter().zip(&closes) {
            assert_relative_eq!(*value, *close);
        }
    }

    #[test]
    fn ema_equal_prices_stay_flat() {
        let values = calculate_ema(&[100.0; 6], 4);
        for value in values {
            assert_relative_eq!(value, 100.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn ema_tracks_trend_with_lag() {
        let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let values = calculate_ema(&closes, 5);
        // Rising input: EMA rises too but stays below the latest close.
        for i in 1..closes.len() {
            assert!(values[i] > values[i - 1]);
            assert!(values[i] < closes[i]);
        }
    }

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 3).is_empty());
    }

    #[test]
    fn ema_length_matches_input() {
        assert_eq!(calculate_ema(&[1.0, 2.0, 3.0], 2).len(), 3);
    }

    #[test]
    fn ema_smoothing_factor() {
        let period = 10;
        let k = 2.0 / (period as f64 + 1.0);
        assert_relative_eq!(k, 2.0 / 11.0);
    }
}
