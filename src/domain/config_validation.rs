//! Configuration validation.
//!
//! Validates config fields before a comparison runs. Absent keys are fine
//! (defaults apply); present keys must parse and sit in range.

use crate::domain::error::StratbenchError;
use crate::domain::strategy_parser;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), StratbenchError> {
    validate_initial_capital(config)?;
    validate_fraction(config, "commission_rate")?;
    validate_fraction(config, "slippage_rate")?;
    validate_fraction(config, "risk_free_rate")?;
    Ok(())
}

/// Checks the `[strategies] list` value when present. Parse errors and
/// out-of-range parameters keep their own error categories; only an empty
/// list is a config-level problem.
pub fn validate_strategies_config(config: &dyn ConfigPort) -> Result<(), StratbenchError> {
    let Some(list) = config.get_string("strategies", "list") else {
        return Ok(());
    };

    if list.trim().is_empty() {
        return Err(StratbenchError::ConfigInvalid {
            section: "strategies".to_string(),
            key: "list".to_string(),
            reason: "strategy list is empty".to_string(),
        });
    }

    let strategies = strategy_parser::parse_list(&list)?;
    for strategy in &strategies {
        strategy.validate()?;
    }
    Ok(())
}

/// Present-but-unparseable numbers are an explicit error, not a silent
/// fallback to the default.
fn parsed_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, StratbenchError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(_) => match config.get_double(section, key) {
            Some(value) => Ok(Some(value)),
            None => Err(StratbenchError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: "not a number".to_string(),
            }),
        },
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), StratbenchError> {
    if let Some(value) = parsed_double(config, "backtest", "initial_capital")? {
        if !value.is_finite() || value <= 0.0 {
            return Err(StratbenchError::ConfigInvalid {
                section: "backtest".to_string(),
                key: "initial_capital".to_string(),
                reason: "initial_capital must be positive".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_fraction(config: &dyn ConfigPort, key: &str) -> Result<(), StratbenchError> {
    if let Some(value) = parsed_double(config, "backtest", key)? {
        if !value.is_finite() || value < 0.0 || value >= 1.0 {
            return Err(StratbenchError::ConfigInvalid {
                section: "backtest".to_string(),
                key: key.to_string(),
                reason: format!("{key} must be a fraction in [0, 1)"),
            });
        }
    }
    Ok(())
}
