//! Bar-replay simulator and per-strategy result assembly.
//!
//! `simulate` walks a price series and its aligned signal sequence through
//! the Flat/Long state machine; `run_backtest` wraps one strategy run into a
//! result record; `run_comparison` fans a strategy set plus the buy-and-hold
//! baseline out over one series.

use super::execution::{enter_long, exit_long};
use super::metrics::Metrics;
use super::portfolio::{EquityPoint, Portfolio, TradeRecord};
use super::series::PriceSeries;
use super::signal::Signal;
use super::strategy::Strategy;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub commission_rate: f64,
    pub slippage_rate: f64,
    pub risk_free_rate: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 100_000.0,
            commission_rate: 0.001,
            slippage_rate: 0.0005,
            risk_free_rate: 0.02,
        }
    }
}

/// Everything one strategy run produces: the equity trajectory (one point
/// per bar), the trade log, and the metrics derived from both.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<TradeRecord>,
    pub metrics: Metrics,
}

/// One named strategy run inside a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRun {
    pub name: String,
    pub result: BacktestResult,
}

/// All strategy runs for one symbol, plus the buy-and-hold trajectory they
/// are judged against.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub symbol: String,
    pub initial_capital: f64,
    pub runs: Vec<StrategyRun>,
    pub buy_hold: Vec<EquityPoint>,
}

impl Comparison {
    pub fn buy_hold_final_equity(&self) -> f64 {
        match self.buy_hold.last() {
            Some(point) => point.equity,
            None => self.initial_capital,
        }
    }

    pub fn buy_hold_return(&self) -> f64 {
        (self.buy_hold_final_equity() - self.initial_capital) / self.initial_capital
    }
}

/// Replay one signal sequence against its series.
///
/// Bar 0 is the initial state: fully in cash, equity pinned to
/// `initial_capital`. From bar 1 on, Buy converts all cash to shares when
/// flat and Sell liquidates when long; every other (state, signal)
/// combination is a no-op. Equity is marked at every bar whether or not a
/// transition happened, and an open position at series end stays open.
pub fn simulate(series: &PriceSeries, signals: &[Signal], config: &BacktestConfig) -> Portfolio {
    let bars = series.bars();
    debug_assert_eq!(bars.len(), signals.len(), "one signal per bar");

    let mut portfolio = Portfolio::new(config.initial_capital);
    portfolio.record_equity(bars[0].date, config.initial_capital);

    for (bar, signal) in bars.iter().zip(signals).skip(1) {
        match signal {
            Signal::Buy if !portfolio.is_long() => {
                enter_long(&mut portfolio, bar, config.commission_rate, config.slippage_rate);
            }
            Signal::Sell if portfolio.is_long() => {
                exit_long(&mut portfolio, bar, config.commission_rate, config.slippage_rate);
            }
            _ => {}
        }
        let equity = portfolio.equity(bar.close);
        portfolio.record_equity(bar.date, equity);
    }

    portfolio
}

/// Generate signals for one strategy, simulate, and derive metrics.
pub fn run_backtest(
    series: &PriceSeries,
    strategy: &Strategy,
    config: &BacktestConfig,
) -> BacktestResult {
    let signals = strategy.signals(series);
    let portfolio = simulate(series, &signals, config);
    let metrics = Metrics::compute(&portfolio, config.risk_free_rate);

    BacktestResult {
        equity_curve: portfolio.equity_curve,
        trades: portfolio.trades,
        metrics,
    }
}

/// Frictionless fully-invested baseline: `initial_capital / first_close`
/// shares held from the first bar, marked at every close.
pub fn buy_and_hold(series: &PriceSeries, initial_capital: f64) -> Vec<EquityPoint> {
    let shares = initial_capital / series.first_close();
    series
        .bars()
        .iter()
        .map(|bar| EquityPoint {
            date: bar.date,
            equity: shares * bar.close,
        })
        .collect()
}

/// Run every strategy in the set against one symbol's series.
pub fn run_comparison(
    symbol: &str,
    series: &PriceSeries,
    strategies: &[Strategy],
    config: &BacktestConfig,
) -> Comparison {
    let runs = strategies
        .iter()
        .map(|strategy| StrategyRun {
            name: strategy.to_string(),
            result: run_backtest(series, strategy, config),
        })
        .collect();

    Comparison {
        symbol: symbol.to_string(),
        initial_capital: config.initial_capital,
        runs,
        buy_hold: buy_and_hold(series, config.initial_capital),
    }
}
