//! Strategy variants and their signal generation.
//!
//! One tagged type covers the four comparison candidates; [`Strategy::signals`]
//! is the single boundary between indicator math and the simulator.

use std::fmt;

use crate::domain::error::StratbenchError;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::{calculate_ema, calculate_macd, calculate_rsi, calculate_sma};
use crate::domain::series::PriceSeries;
use crate::domain::signal::{crossed_above, crossed_below, crossover, Signal};

/// An indicator rule with fixed parameters.
///
/// Signal generation is a pure function of the series and the parameters:
/// rerunning a strategy over the same series reproduces the sequence
/// bit-for-bit.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Fast/slow simple moving average crossover.
    SmaCross { fast: usize, slow: usize },
    /// Fast/slow exponential moving average crossover.
    EmaCross { fast: usize, slow: usize },
    /// Mean reversion on RSI threshold crossings.
    RsiReversion {
        period: usize,
        oversold: f64,
        overbought: f64,
    },
    /// MACD line vs signal line crossover.
    MacdCross {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

impl Strategy {
    /// The comparison lineup used when no strategies are configured.
    pub fn default_set() -> Vec<Strategy> {
        vec![
            Strategy::SmaCross { fast: 10, slow: 30 },
            Strategy::SmaCross { fast: 20, slow: 50 },
            Strategy::EmaCross { fast: 12, slow: 26 },
            Strategy::RsiReversion {
                period: 14,
                oversold: 30.0,
                overbought: 70.0,
            },
            Strategy::MacdCross {
                fast: DEFAULT_FAST,
                slow: DEFAULT_SLOW,
                signal: DEFAULT_SIGNAL,
            },
        ]
    }

    /// Reject parameters the generators cannot run with.
    pub fn validate(&self) -> Result<(), StratbenchError> {
        match self {
            Strategy::SmaCross { fast, slow } | Strategy::EmaCross { fast, slow } => {
                if *fast == 0 || *slow == 0 {
                    return Err(StratbenchError::StrategyInvalid {
                        reason: format!("{self}: periods must be at least 1"),
                    });
                }
            }
            Strategy::RsiReversion {
                period,
                oversold,
                overbought,
            } => {
                if *period == 0 {
                    return Err(StratbenchError::StrategyInvalid {
                        reason: format!("{self}: period must be at least 1"),
                    });
                }
                let in_range = oversold.is_finite()
                    && overbought.is_finite()
                    && *oversold >= 0.0
                    && *overbought <= 100.0
                    && oversold < overbought;
                if !in_range {
                    return Err(StratbenchError::StrategyInvalid {
                        reason: format!(
                            "{self}: thresholds must satisfy 0 <= oversold < overbought <= 100"
                        ),
                    });
                }
            }
            Strategy::MacdCross { fast, slow, signal } => {
                if *fast == 0 || *slow == 0 || *signal == 0 {
                    return Err(StratbenchError::StrategyInvalid {
                        reason: format!("{self}: periods must be at least 1"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Generate the per-bar signal sequence for `series`.
    ///
    /// Output length equals the series length. Index 0 is always Hold, and
    /// so is any bar where a compared value is undefined.
    pub fn signals(&self, series: &PriceSeries) -> Vec<Signal> {
        let closes = series.closes();
        match self {
            Strategy::SmaCross { fast, slow } => {
                let fast_ma = calculate_sma(&closes, *fast);
                let slow_ma = calculate_sma(&closes, *slow);
                crossover_signals_windowed(&fast_ma, &slow_ma)
            }
            Strategy::EmaCross { fast, slow } => {
                let fast_ma = calculate_ema(&closes, *fast);
                let slow_ma = calculate_ema(&closes, *slow);
                crossover_signals(&fast_ma, &slow_ma)
            }
            Strategy::RsiReversion {
                period,
                oversold,
                overbought,
            } => {
                let rsi = calculate_rsi(&closes, *period);
                let mut signals = vec![Signal::Hold; closes.len()];
                for i in 1..closes.len() {
                    if let (Some(prev), Some(curr)) = (rsi[i - 1], rsi[i]) {
                        if crossed_above(prev, curr, *oversold, *oversold) {
                            signals[i] = Signal::Buy;
                        } else if crossed_below(prev, curr, *overbought, *overbought) {
                            signals[i] = Signal::Sell;
                        }
                    }
                }
                signals
            }
            Strategy::MacdCross { fast, slow, signal } => {
                let macd = calculate_macd(&closes, *fast, *slow, *signal);
                crossover_signals(&macd.line, &macd.signal)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::SmaCross { fast, slow } => write!(f, "SMA({},{})", fast, slow),
            Strategy::EmaCross { fast, slow } => write!(f, "EMA({},{})", fast, slow),
            Strategy::RsiReversion {
                period,
                oversold,
                overbought,
            } => write!(f, "RSI({},{},{})", period, oversold, overbought),
            Strategy::MacdCross { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
        }
    }
}

/// Crossover signals for two fully defined lines.
fn crossover_signals(fast: &[f64], slow: &[f64]) -> Vec<Signal> {
    let mut signals = vec![Signal::Hold; fast.len()];
    for i in 1..fast.len() {
        signals[i] = crossover(fast[i - 1], fast[i], slow[i - 1], slow[i]);
    }
    signals
}

/// Crossover signals for windowed lines; a bar where either side of the
/// comparison is undefined stays Hold.
fn crossover_signals_windowed(fast: &[Option<f64>], slow: &[Option<f64>]) -> Vec<Signal> {
    let mut signals = vec![Signal::Hold; fast.len()];
    for i in 1..fast.len() {
        if let (Some(fast_prev), Some(fast_curr), Some(slow_prev), Some(slow_curr)) =
            (fast[i - 1], fast[i], slow[i - 1], slow[i])
        {
            signals[i] = crossover(fast_prev, fast_curr, slow_prev, slow_curr);
        }
    }
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::Bar;
    use chrono::NaiveDate;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    #[test]
    fn display_round_trips_parameters() {
        assert_eq!(
            Strategy::SmaCross { fast: 10, slow: 30 }.to_string(),
            "SMA(10,30)"
        );
        assert_eq!(
            Strategy::EmaCross { fast: 12, slow: 26 }.to_string(),
            "EMA(12,26)"
        );
        assert_eq!(
            Strategy::RsiReversion {
                period: 14,
                oversold: 30.0,
                overbought: 70.0
            }
            .to_string(),
            "RSI(14,30,70)"
        );
        assert_eq!(
            Strategy::MacdCross {
                fast: 12,
                slow: 26,
                signal: 9
            }
            .to_string(),
            "MACD(12,26,9)"
        );
    }

    #[test]
    fn default_set_is_the_standard_lineup() {
        let names: Vec<String> = Strategy::default_set()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "SMA(10,30)",
                "SMA(20,50)",
                "EMA(12,26)",
                "RSI(14,30,70)",
                "MACD(12,26,9)"
            ]
        );
    }

    #[test]
    fn signals_align_with_series_and_start_hold() {
        let series = make_series(&[10.0, 11.0, 12.0, 11.0, 10.0, 11.0]);
        for strategy in Strategy::default_set() {
            let signals = strategy.signals(&series);
            assert_eq!(signals.len(), series.bar_count());
            assert_eq!(signals[0], Signal::Hold);
        }
    }

    #[test]
    fn sma_cross_fires_once_each_way() {
        let series = make_series(&[10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 14.0, 12.0, 10.0, 10.0]);
        let signals = Strategy::SmaCross { fast: 2, slow: 3 }.signals(&series);

        assert_eq!(signals[3], Signal::Buy);
        assert_eq!(signals[7], Signal::Sell);
        let quiet = signals
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 3 && *i != 7)
            .all(|(_, s)| *s == Signal::Hold);
        assert!(quiet, "only bars 3 and 7 may signal: {signals:?}");
    }

    #[test]
    fn sma_cross_holds_through_warmup() {
        let series = make_series(&[10.0, 12.0, 14.0, 16.0]);
        let signals = Strategy::SmaCross { fast: 3, slow: 5 }.signals(&series);
        // Slow window never fills: no bar may signal.
        assert!(signals.iter().all(|s| *s == Signal::Hold));
    }

    #[test]
    fn ema_cross_can_fire_on_second_bar() {
        // No warm-up gate on EMA: index 1 is the earliest possible signal.
        let series = make_series(&[10.0, 20.0, 20.0]);
        let signals = Strategy::EmaCross { fast: 1, slow: 2 }.signals(&series);
        assert_eq!(signals[1], Signal::Buy);
    }

    #[test]
    fn rsi_reversion_buy_and_sell_thresholds() {
        let series = make_series(&[100.0, 90.0, 80.0, 85.0, 95.0, 94.0, 80.0]);
        let strategy = Strategy::RsiReversion {
            period: 2,
            oversold: 30.0,
            overbought: 70.0,
        };
        let signals = strategy.signals(&series);

        // RSI(2): 0 at bar 2, ~33.3 at bar 3 (upward cross of 30),
        // undefined at bar 4 (no losses in window), ~90.9 at bar 5 with an
        // undefined prior (gated), 0 at bar 6 (downward cross of 70).
        assert_eq!(signals[3], Signal::Buy);
        assert_eq!(signals[4], Signal::Hold);
        assert_eq!(signals[5], Signal::Hold);
        assert_eq!(signals[6], Signal::Sell);
    }

    #[test]
    fn rsi_undefined_everywhere_is_all_hold() {
        // Strictly rising closes: every RSI window lacks losses.
        let series = make_series(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let strategy = Strategy::RsiReversion {
            period: 2,
            oversold: 30.0,
            overbought: 70.0,
        };
        assert!(strategy.signals(&series).iter().all(|s| *s == Signal::Hold));
    }

    #[test]
    fn macd_cross_buy_then_sell() {
        let series = make_series(&[100.0, 100.0, 110.0, 100.0]);
        let signals = Strategy::MacdCross {
            fast: 12,
            slow: 26,
            signal: 9,
        }
        .signals(&series);
        assert_eq!(
            signals,
            vec![Signal::Hold, Signal::Hold, Signal::Buy, Signal::Sell]
        );
    }

    #[test]
    fn flat_series_never_signals() {
        let series = make_series(&[100.0; 60]);
        for strategy in Strategy::default_set() {
            assert!(
                strategy.signals(&series).iter().all(|s| *s == Signal::Hold),
                "{strategy} signalled on a flat series"
            );
        }
    }

    #[test]
    fn validate_accepts_default_set() {
        for strategy in Strategy::default_set() {
            strategy.validate().unwrap();
        }
    }

    #[test]
    fn validate_rejects_zero_period() {
        let err = Strategy::SmaCross { fast: 0, slow: 30 }
            .validate()
            .unwrap_err();
        assert!(matches!(err, StratbenchError::StrategyInvalid { .. }));

        let err = Strategy::MacdCross {
            fast: 12,
            slow: 26,
            signal: 0,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, StratbenchError::StrategyInvalid { .. }));
    }

    #[test]
    fn validate_rejects_inverted_rsi_thresholds() {
        let err = Strategy::RsiReversion {
            period: 14,
            oversold: 70.0,
            overbought: 30.0,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, StratbenchError::StrategyInvalid { .. }));
    }

    #[test]
    fn validate_rejects_non_finite_threshold() {
        let err = Strategy::RsiReversion {
            period: 14,
            oversold: f64::NAN,
            overbought: 70.0,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, StratbenchError::StrategyInvalid { .. }));
    }
}
