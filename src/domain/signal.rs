//! Discrete per-bar trading signals and the strict crossover rule.

/// Per-bar trading decision, aligned by index to a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// True when `left` moved from at-or-below `right` on the prior bar to
/// strictly above it on the current bar.
pub fn crossed_above(prev_left: f64, left: f64, prev_right: f64, right: f64) -> bool {
    left > right && prev_left <= prev_right
}

/// True when `left` moved from at-or-above `right` on the prior bar to
/// strictly below it on the current bar.
pub fn crossed_below(prev_left: f64, left: f64, prev_right: f64, right: f64) -> bool {
    left < right && prev_left >= prev_right
}

/// Strict two-line crossover: fires only on the bar where the relative
/// order of the compared values changes. A tie followed by a tie is Hold.
pub fn crossover(prev_left: f64, left: f64, prev_right: f64, right: f64) -> Signal {
    if crossed_above(prev_left, left, prev_right, right) {
        Signal::Buy
    } else if crossed_below(prev_left, left, prev_right, right) {
        Signal::Sell
    } else {
        Signal::Hold
    }
}
