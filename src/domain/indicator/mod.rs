//! Technical indicators over close-price slices.
//!
//! Indicators with a fixed rolling window ([`sma`], [`rsi`]) yield `None`
//! until enough history exists. Exponentially weighted indicators ([`ema`],
//! [`macd`]) use adjusted weights and are defined from the first sample.

pub mod sma;
pub mod ema;
pub mod rsi;
pub mod macd;

pub use ema::calculate_ema;
pub use macd::{calculate_macd, calculate_macd_default, MacdSeries};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
