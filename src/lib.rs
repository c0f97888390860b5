//! stratbench — trading strategy comparison backtester.
//!
//! Replays indicator-driven Buy/Sell/Hold signal sequences over daily OHLC
//! series, simulates a single all-in/all-out position under percentage
//! transaction costs, and reports risk/return metrics per strategy next to a
//! buy-and-hold baseline.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The [`cli`] module wires the three
//! together.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
