//! RSI (Relative Strength Index) over a fixed rolling window.
//!
//! Close-to-close changes split into gains and losses, each averaged with a
//! plain rolling mean over the last n changes:
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! Undefined while the window is unfilled (the first change exists at index
//! 1, so the first value sits at index n) and wherever the window's average
//! loss is zero: an all-gain or flat window has no meaningful ratio and must
//! never feed a threshold comparison.

/// Rolling-window RSI of `closes`.
///
/// Output is index-aligned with the input; undefined entries are `None`.
/// `period` must be at least 1.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    debug_assert!(period >= 1, "period must be at least 1");

    let len = closes.len();
    let mut values = vec![None; len];
    if len < 2 {
        return values;
    }

    // gains[i]/losses[i] hold the move into bar i; index 0 has no prior
    // close and never falls inside a window.
    let mut gains = vec![0.0; len];
    let mut losses = vec![0.0; len];
    for i in 1..len {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            gains[i] = change;
        } else {
            losses[i] = -change;
        }
    }

    for i in period..len {
        let start = i + 1 - period;
        let avg_gain = gains[start..=i].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[start..=i].iter().sum::<f64>() / period as f64;
        if avg_loss == 0.0 {
            continue;
        }
        values[i] = Some(100.0 - (100.0 / (1.0 + avg_gain / avg_loss)));
    }

    values
}
