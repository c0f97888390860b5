//! Data access port trait.

use crate::domain::error::StratbenchError;
use crate::domain::series::PriceSeries;
use chrono::NaiveDate;

pub trait DataPort {
    /// Load the full validated price history for one symbol.
    fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, StratbenchError>;

    fn list_symbols(&self) -> Result<Vec<String>, StratbenchError>;

    /// First date, last date, and bar count for a symbol; `None` when the
    /// symbol has no data.
    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StratbenchError>;
}
