//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::{self, TextReportAdapter};
use crate::domain::backtest::{run_comparison, BacktestConfig, Comparison};
use crate::domain::config_validation::{validate_backtest_config, validate_strategies_config};
use crate::domain::error::StratbenchError;
use crate::domain::strategy::Strategy;
use crate::domain::strategy_parser;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stratbench", about = "Trading strategy comparison backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every configured strategy against the configured symbols
    Compare {
        #[arg(short, long)]
        config: PathBuf,
        /// Run one symbol instead of the configured list
        #[arg(short, long)]
        symbol: Option<String>,
        /// Report file path (overrides [report] output)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Append per-strategy trade logs to the report
        #[arg(long)]
        show_trades: bool,
    },
    /// Validate configuration and strategy list without touching data
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range for a symbol
    Info {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Compare {
            config,
            symbol,
            output,
            show_trades,
        } => run_compare(&config, symbol.as_deref(), output.as_ref(), show_trades),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { symbol, config } => run_info(&symbol, &config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StratbenchError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_compare(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_override: Option<&PathBuf>,
    show_trades_flag: bool,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate config and strategy list
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategies_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Build backtest config and strategy set
    let bt_config = build_backtest_config(&adapter);
    let strategies = match build_strategies(&adapter) {
        Ok(s) => s,
        Err(code) => return code,
    };
    eprintln!("Comparing {} strategies", strategies.len());

    // Stage 4: Resolve symbols
    let symbols = resolve_symbols(symbol_override, &adapter);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured");
        return ExitCode::from(2);
    }

    // Stage 5: Data port
    let data_port = match CsvAdapter::from_config(&adapter) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let output = output_override
        .map(|p| p.display().to_string())
        .or_else(|| adapter.get_string("report", "output"));
    let show_trades =
        show_trades_flag || adapter.get_bool("report", "show_trades").unwrap_or(false);

    run_compare_pipeline(
        &data_port,
        &strategies,
        &bt_config,
        &symbols,
        output.as_deref(),
        show_trades,
    )
}

/// Stages 6-7: per-symbol runs, then the optional report file.
///
/// A symbol that fails to load is reported and skipped; the run fails only
/// when every symbol fails.
pub fn run_compare_pipeline(
    data_port: &dyn DataPort,
    strategies: &[Strategy],
    bt_config: &BacktestConfig,
    symbols: &[String],
    output_path: Option<&str>,
    show_trades: bool,
) -> ExitCode {
    // Stage 6: Fetch each series and run the comparison
    let mut comparisons: Vec<Comparison> = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let series = match data_port.fetch_series(symbol) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("warning: skipping {} ({})", symbol, e);
                continue;
            }
        };

        eprintln!(
            "Running {} strategies on {} ({} bars)",
            strategies.len(),
            symbol,
            series.bar_count()
        );
        let comparison = run_comparison(symbol, &series, strategies, bt_config);
        eprint!("{}", text_report::format_summary(&comparison));
        comparisons.push(comparison);
    }

    if comparisons.is_empty() {
        eprintln!("error: no symbols produced results");
        return ExitCode::from(3);
    }

    // Stage 7: Write the combined report when an output path is configured
    if let Some(path) = output_path {
        let report = TextReportAdapter::new(show_trades);
        if let Err(e) = report.write(&comparisons, path) {
            eprintln!("error: failed to write report: {e}");
            return (&e).into();
        }
        eprintln!("\nReport written to: {path}");
    }

    ExitCode::SUCCESS
}

pub fn build_backtest_config(config: &dyn ConfigPort) -> BacktestConfig {
    let defaults = BacktestConfig::default();
    BacktestConfig {
        initial_capital: config
            .get_double("backtest", "initial_capital")
            .unwrap_or(defaults.initial_capital),
        commission_rate: config
            .get_double("backtest", "commission_rate")
            .unwrap_or(defaults.commission_rate),
        slippage_rate: config
            .get_double("backtest", "slippage_rate")
            .unwrap_or(defaults.slippage_rate),
        risk_free_rate: config
            .get_double("backtest", "risk_free_rate")
            .unwrap_or(defaults.risk_free_rate),
    }
}

pub fn build_strategies(config: &dyn ConfigPort) -> Result<Vec<Strategy>, ExitCode> {
    let Some(list) = config.get_string("strategies", "list") else {
        return Ok(Strategy::default_set());
    };

    let strategies = match strategy_parser::parse_list(&list) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "error: failed to parse strategy list:\n{}",
                e.display_with_context(&list)
            );
            return Err(ExitCode::from(4));
        }
    };

    for strategy in &strategies {
        if let Err(e) = strategy.validate() {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    }

    Ok(strategies)
}

pub fn resolve_symbols(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(symbol) = symbol_override {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return vec![];
        }
        return vec![symbol];
    }

    if let Some(symbols_str) = config.get_string("data", "symbols") {
        return symbols_str
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    vec![]
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategies_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategies = match build_strategies(&adapter) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let bt_config = build_backtest_config(&adapter);

    eprintln!("\nBacktest settings:");
    eprintln!("  initial_capital: {}", bt_config.initial_capital);
    eprintln!("  commission_rate: {}", bt_config.commission_rate);
    eprintln!("  slippage_rate:   {}", bt_config.slippage_rate);
    eprintln!("  risk_free_rate:  {}", bt_config.risk_free_rate);

    eprintln!("\nStrategies:");
    for strategy in &strategies {
        eprintln!("  {}", strategy);
    }

    let symbols = resolve_symbols(None, &adapter);
    if !symbols.is_empty() {
        eprintln!("\nSymbols: {}", symbols.join(", "));
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_port = match CsvAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(symbol: &str, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_port = match CsvAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbol = symbol.trim().to_uppercase();
    match data_port.data_range(&symbol) {
        Ok(Some((first, last, count))) => {
            println!("{}: {} bars, {} to {}", symbol, count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no data found", symbol);
            ExitCode::from(3)
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
