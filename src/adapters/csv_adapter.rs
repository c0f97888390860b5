//! CSV file data adapter.
//!
//! One `{SYMBOL}.csv` per instrument under a base directory, columns
//! `date,open,high,low,close` with anything after close (volume, adjusted
//! close) ignored. Rows are sorted by date before series validation, so an
//! out-of-order error from the constructor means duplicate dates in the file.

use crate::domain::error::StratbenchError;
use crate::domain::series::{Bar, PriceSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug)]
pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, StratbenchError> {
        let csv_dir = config.get_string("data", "csv_dir").ok_or_else(|| {
            StratbenchError::ConfigMissing {
                section: "data".to_string(),
                key: "csv_dir".to_string(),
            }
        })?;
        Ok(Self::new(PathBuf::from(csv_dir)))
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn parse_price(record: &csv::StringRecord, index: usize, name: &str, row: usize) -> Result<f64, StratbenchError> {
        record
            .get(index)
            .ok_or_else(|| StratbenchError::Data {
                reason: format!("row {}: missing {} column", row, name),
            })?
            .trim()
            .parse()
            .map_err(|e| StratbenchError::Data {
                reason: format!("row {}: invalid {} value: {}", row, name, e),
            })
    }
}

impl DataPort for CsvAdapter {
    fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, StratbenchError> {
        let path = self.csv_path(symbol);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StratbenchError::NoData {
                    symbol: symbol.to_string(),
                });
            }
            Err(e) => {
                return Err(StratbenchError::Data {
                    reason: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (i, result) in rdr.records().enumerate() {
            // Header is row 1; the first record is row 2.
            let row = i + 2;
            let record = result.map_err(|e| StratbenchError::Data {
                reason: format!("row {}: CSV parse error: {}", row, e),
            })?;

            let date_str = record.get(0).ok_or_else(|| StratbenchError::Data {
                reason: format!("row {}: missing date column", row),
            })?;
            let date =
                NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                    StratbenchError::Data {
                        reason: format!("row {}: invalid date format: {}", row, e),
                    }
                })?;

            bars.push(Bar {
                date,
                open: Self::parse_price(&record, 1, "open", row)?,
                high: Self::parse_price(&record, 2, "high", row)?,
                low: Self::parse_price(&record, 3, "low", row)?,
                close: Self::parse_price(&record, 4, "close", row)?,
            });
        }

        if bars.is_empty() {
            return Err(StratbenchError::NoData {
                symbol: symbol.to_string(),
            });
        }

        bars.sort_by_key(|b| b.date);
        PriceSeries::new(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StratbenchError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StratbenchError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StratbenchError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StratbenchError> {
        match self.fetch_series(symbol) {
            Ok(series) => {
                let bars = series.bars();
                let first = bars[0].date;
                let last = bars[bars.len() - 1].date;
                Ok(Some((first, last, bars.len())))
            }
            Err(StratbenchError::NoData { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
