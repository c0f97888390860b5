//! Validated OHLC price series.

use chrono::NaiveDate;

use crate::domain::error::StratbenchError;

/// One daily OHLC observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Time-ascending sequence of bars, at least one bar long.
///
/// Validated once on construction; every downstream component reads it
/// through a shared reference without re-checking.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from bars, rejecting empty input, out-of-order or
    /// duplicate dates, and non-positive or non-finite prices.
    pub fn new(bars: Vec<Bar>) -> Result<Self, StratbenchError> {
        if bars.is_empty() {
            return Err(StratbenchError::EmptySeries);
        }
        for (index, bar) in bars.iter().enumerate() {
            let prices = [bar.open, bar.high, bar.low, bar.close];
            if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
                return Err(StratbenchError::InvalidPrice { index });
            }
            if index > 0 && bar.date <= bars[index - 1].date {
                return Err(StratbenchError::OutOfOrder { index });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn first_close(&self) -> f64 {
        self.bars[0].close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: f64) -> Bar {
        Bar {
            date: date.parse().unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
        }
    }

    #[test]
    fn valid_series_constructs() {
        let series =
            PriceSeries::new(vec![bar("2024-01-02", 100.0), bar("2024-01-03", 101.0)]).unwrap();
        assert_eq!(series.bar_count(), 2);
        assert_eq!(series.closes(), vec![100.0, 101.0]);
        assert!((series.first_close() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_bar_is_valid() {
        let series = PriceSeries::new(vec![bar("2024-01-02", 100.0)]).unwrap();
        assert_eq!(series.bar_count(), 1);
    }

    #[test]
    fn empty_series_rejected() {
        let err = PriceSeries::new(Vec::new()).unwrap_err();
        assert!(matches!(err, StratbenchError::EmptySeries));
    }

    #[test]
    fn duplicate_date_rejected() {
        let err = PriceSeries::new(vec![bar("2024-01-02", 100.0), bar("2024-01-02", 101.0)])
            .unwrap_err();
        assert!(matches!(err, StratbenchError::OutOfOrder { index: 1 }));
    }

    #[test]
    fn descending_date_rejected() {
        let err = PriceSeries::new(vec![bar("2024-01-03", 100.0), bar("2024-01-02", 101.0)])
            .unwrap_err();
        assert!(matches!(err, StratbenchError::OutOfOrder { index: 1 }));
    }

    #[test]
    fn zero_price_rejected() {
        let mut bad = bar("2024-01-02", 100.0);
        bad.low = 0.0;
        let err = PriceSeries::new(vec![bad]).unwrap_err();
        assert!(matches!(err, StratbenchError::InvalidPrice { index: 0 }));
    }

    #[test]
    fn negative_price_rejected() {
        let err = PriceSeries::new(vec![bar("2024-01-02", -5.0)]).unwrap_err();
        assert!(matches!(err, StratbenchError::InvalidPrice { index: 0 }));
    }

    #[test]
    fn non_finite_price_rejected() {
        let mut bad = bar("2024-01-03", 100.0);
        bad.high = f64::NAN;
        let err =
            PriceSeries::new(vec![bar("2024-01-02", 99.0), bad]).unwrap_err();
        assert!(matches!(err, StratbenchError::InvalidPrice { index: 1 }));
    }
}
