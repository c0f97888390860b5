//! Portfolio state, trade log, and equity tracking.

use chrono::NaiveDate;

/// One point on the equity trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// One executed transition, recorded at the raw close price; the cost
/// adjustment lives in the cash flow, not in the log.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub side: TradeSide,
    pub price: f64,
    pub quantity: f64,
}

/// The simulator's accumulator: single-position cash/shares state plus the
/// append-only trade log and equity curve.
///
/// Records strictly alternate Buy, Sell, Buy, ... starting with Buy; the
/// state machine in the simulator is what guarantees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub cash: f64,
    pub shares: f64,
    pub initial_capital: f64,
    pub trades: Vec<TradeRecord>,
    pub equity_curve: Vec<EquityPoint>,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        Portfolio {
            cash: initial_capital,
            shares: 0.0,
            initial_capital,
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn is_long(&self) -> bool {
        self.shares > 0.0
    }

    /// Mark-to-market value at `close`.
    pub fn equity(&self, close: f64) -> f64 {
        self.cash + self.shares * close
    }

    pub fn record_trade(&mut self, trade: TradeRecord) {
        self.trades.push(trade);
    }

    pub fn record_equity(&mut self, date: NaiveDate, equity: f64) {
        self.equity_curve.push(EquityPoint { date, equity });
    }
}
