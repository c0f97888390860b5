//! Report generation port trait.

use crate::domain::backtest::Comparison;
use crate::domain::error::StratbenchError;

/// Port for writing strategy-comparison reports.
pub trait ReportPort {
    fn write(
        &self,
        comparisons: &[Comparison],
        output_path: &str,
    ) -> Result<(), StratbenchError>;
}
