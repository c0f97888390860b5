//! Fill arithmetic for the single-position simulator.
//!
//! Entries are all-in (fractional shares, every dollar of cash committed),
//! exits are all-out. Commission and slippage are fractional rates applied
//! symmetrically: they inflate the effective buy price and deflate the
//! effective sell price. Trade records always carry the raw close.

use super::portfolio::{Portfolio, TradeRecord, TradeSide};
use super::series::Bar;

/// Effective cost multiplier on the buy side.
pub fn buy_cost_rate(commission_rate: f64, slippage_rate: f64) -> f64 {
    1.0 + commission_rate + slippage_rate
}

/// Effective proceeds multiplier on the sell side.
pub fn sell_proceeds_rate(commission_rate: f64, slippage_rate: f64) -> f64 {
    1.0 - commission_rate - slippage_rate
}

/// Convert all cash into shares at this bar's close.
///
/// Quantity is `cash / (close * buy_rate)`; the cash that remains is the
/// exact floating-point remainder `cash - quantity * close * buy_rate`,
/// never forced to zero. A Buy record at the raw close is appended.
pub fn enter_long(
    portfolio: &mut Portfolio,
    bar: &Bar,
    commission_rate: f64,
    slippage_rate: f64,
) {
    debug_assert!(!portfolio.is_long(), "enter_long requires a flat portfolio");

    let rate = buy_cost_rate(commission_rate, slippage_rate);
    let quantity = portfolio.cash / (bar.close * rate);

    portfolio.cash -= quantity * bar.close * rate;
    portfolio.shares = quantity;

    portfolio.record_trade(TradeRecord {
        date: bar.date,
        side: TradeSide::Buy,
        price: bar.close,
        quantity,
    });
}

/// Liquidate the whole position at this bar's close.
///
/// Proceeds are `shares * close * sell_rate`, added to cash; shares drop to
/// zero. A Sell record at the raw close is appended.
pub fn exit_long(
    portfolio: &mut Portfolio,
    bar: &Bar,
    commission_rate: f64,
    slippage_rate: f64,
) {
    debug_assert!(portfolio.is_long(), "exit_long requires an open position");

    let rate = sell_proceeds_rate(commission_rate, slippage_rate);
    let quantity = portfolio.shares;

    portfolio.cash += quantity * bar.close * rate;
    portfolio.shares = 0.0;

    portfolio.record_trade(TradeRecord {
        date: bar.date,
        side: TradeSide::Sell,
        price: bar.close,
        quantity,
    });
}
