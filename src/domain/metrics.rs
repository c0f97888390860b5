//! Performance statistics derived from an equity trajectory and trade log.

use super::portfolio::{EquityPoint, Portfolio, TradeSide};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_return: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub sharpe_ratio: f64,
    pub volatility: f64,
    pub trade_count: usize,
    pub final_equity: f64,
}

impl Metrics {
    pub fn compute(portfolio: &Portfolio, risk_free_rate: f64) -> Self {
        let equity_curve = &portfolio.equity_curve;
        let initial_capital = portfolio.initial_capital;

        let final_equity = equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(initial_capital);

        let total_return = if initial_capital > 0.0 {
            (final_equity - initial_capital) / initial_capital
        } else {
            0.0
        };

        let returns = daily_returns(equity_curve);
        let (volatility, sharpe_ratio) = risk_stats(&returns, risk_free_rate);

        Metrics {
            total_return,
            max_drawdown: compute_drawdown(equity_curve),
            win_rate: compute_win_rate(&portfolio.trades),
            sharpe_ratio,
            volatility,
            trade_count: portfolio.trades.len(),
            final_equity,
        }
    }
}

/// Worst peak-to-trough decline as a negative fraction.
///
/// The running peak includes the current bar, so the result is always <= 0;
/// a curve that never dips below its peak scores exactly 0.
fn compute_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    if equity_curve.is_empty() {
        return 0.0;
    }

    let mut peak = equity_curve[0].equity;
    let mut max_drawdown = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        }
        let drawdown = (point.equity - peak) / peak;
        if drawdown < max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown
}

/// Fraction of completed round-trips that sold above their buy price.
///
/// Trades are consumed as consecutive (Buy, Sell) pairs; a trailing open
/// Buy is excluded rather than counted as a loss. Fewer than two records
/// means no completed round-trip, which scores 0 by definition.
fn compute_win_rate(trades: &[crate::domain::portfolio::TradeRecord]) -> f64 {
    if trades.len() < 2 {
        return 0.0;
    }

    let mut wins = 0usize;
    let mut pairs = 0usize;

    for pair in trades.chunks_exact(2) {
        debug_assert_eq!(pair[0].side, TradeSide::Buy, "trade log must alternate starting with Buy");
        debug_assert_eq!(pair[1].side, TradeSide::Sell, "trade log must alternate starting with Buy");
        pairs += 1;
        if pair[1].price > pair[0].price {
            wins += 1;
        }
    }

    wins as f64 / pairs as f64
}

fn daily_returns(equity_curve: &[EquityPoint]) -> Vec<f64> {
    equity_curve
        .windows(2)
        .map(|w| (w[1].equity - w[0].equity) / w[0].equity)
        .collect()
}

/// Annualized volatility and Sharpe ratio from bar-over-bar returns.
///
/// Standard deviation is the sample flavor (n-1 denominator). Fewer than
/// two returns, or a zero deviation, yields the 0.0 sentinels rather than
/// NaN.
fn risk_stats(returns: &[f64], risk_free_rate: f64) -> (f64, f64) {
    if returns.len() < 2 {
        return (0.0, 0.0);
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = variance.sqrt();

    let volatility = stddev * TRADING_DAYS_PER_YEAR.sqrt();
    let sharpe = if stddev > 0.0 {
        (mean * TRADING_DAYS_PER_YEAR - risk_free_rate) / volatility
    } else {
        0.0
    };

    (volatility, sharpe)
}
