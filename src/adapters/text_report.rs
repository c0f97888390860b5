//! Plain-text report adapter implementing ReportPort.
//!
//! One fixed-width performance summary block per symbol, buy-and-hold
//! baseline first, optionally followed by per-strategy trade logs.

use std::fs;
use std::path::Path;

use crate::domain::backtest::{Comparison, StrategyRun};
use crate::domain::error::StratbenchError;
use crate::domain::portfolio::TradeSide;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter {
    show_trades: bool,
}

impl TextReportAdapter {
    pub fn new(show_trades: bool) -> Self {
        Self { show_trades }
    }
}

/// Render one symbol's summary table.
///
/// Sharpe and win rate print `N/A` at their 0 sentinels; drawdown prints as
/// a magnitude. The baseline row carries only a return and a final value —
/// trade-based columns do not apply to it.
pub fn format_summary(comparison: &Comparison) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "=".repeat(80)));
    out.push_str(&format!("PERFORMANCE SUMMARY - {}\n", comparison.symbol));
    out.push_str(&format!("{}\n", "=".repeat(80)));

    out.push_str(&format!(
        "{:<25} | {:<10} | {:<10} | {:<8} | {:<8} | {:<10} | Final Value\n",
        "Strategy", "Return", "Max DD", "Trades", "Sharpe", "Win Rate"
    ));
    out.push_str(&format!("{}\n", "-".repeat(95)));

    out.push_str(&format!(
        "{:<25} | {:<10} | {:<10} | {:<8} | {:<8} | {:<10} | {}\n",
        "Buy & Hold",
        format!("{:.1}%", comparison.buy_hold_return() * 100.0),
        "N/A",
        "N/A",
        "N/A",
        "N/A",
        format_money(comparison.buy_hold_final_equity())
    ));

    for run in &comparison.runs {
        let metrics = &run.result.metrics;
        let sharpe = if metrics.sharpe_ratio != 0.0 {
            format!("{:.2}", metrics.sharpe_ratio)
        } else {
            "N/A".to_string()
        };
        let win_rate = if metrics.win_rate > 0.0 {
            format!("{:.1}%", metrics.win_rate * 100.0)
        } else {
            "N/A".to_string()
        };

        out.push_str(&format!(
            "{:<25} | {:<10} | {:<10} | {:<8} | {:<8} | {:<10} | {}\n",
            run.name,
            format!("{:.1}%", metrics.total_return * 100.0),
            format!("{:.1}%", metrics.max_drawdown.abs() * 100.0),
            metrics.trade_count,
            sharpe,
            win_rate,
            format_money(metrics.final_equity)
        ));
    }

    out
}

pub fn format_trades(run: &StrategyRun) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nTrades - {}\n", run.name));

    if run.result.trades.is_empty() {
        out.push_str("  (no trades)\n");
        return out;
    }

    for trade in &run.result.trades {
        let side = match trade.side {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        };
        out.push_str(&format!(
            "  {}  {:<4}  {:.4} shares @ {:.2}\n",
            trade.date, side, trade.quantity, trade.price
        ));
    }

    out
}

/// Dollar amount rounded to whole units with thousands separators.
fn format_money(value: f64) -> String {
    let rounded = value.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}")
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        comparisons: &[Comparison],
        output_path: &str,
    ) -> Result<(), StratbenchError> {
        let mut content = String::new();
        for comparison in comparisons {
            content.push_str(&format_summary(comparison));
            if self.show_trades {
                for run in &comparison.runs {
                    content.push_str(&format_trades(run));
                }
            }
        }

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StratbenchError::Io)?;
            }
        }
        fs::write(path, content).map_err(StratbenchError::Io)?;

        Ok(())
    }
}
