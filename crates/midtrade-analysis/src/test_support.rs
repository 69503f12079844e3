//! Fixtures and a mock regressor for exercising the pipeline without real
//! datasets or a numerical backend.

use std::sync::atomic::{AtomicUsize, Ordering};

use midtrade_data::Datasets;
use midtrade_models::{DisputeRecord, JoinSample, LinearFit, LogisticFit, Side, TradeRecord};

use crate::error::AnalysisError;
use crate::modeler::Regressor;

/// Returns canned fits and counts how often each model was requested.
pub struct MockRegressor {
    pub linear: LinearFit,
    pub logistic: LogisticFit,
    pub should_fail: bool,
    linear_calls: AtomicUsize,
    logistic_calls: AtomicUsize,
}

impl Default for MockRegressor {
    fn default() -> Self {
        Self {
            linear: LinearFit {
                slope: 1.0,
                intercept: 0.0,
            },
            logistic: LogisticFit {
                coefficient: 2.0,
                intercept: -1.0,
            },
            should_fail: false,
            linear_calls: AtomicUsize::new(0),
            logistic_calls: AtomicUsize::new(0),
        }
    }
}

impl MockRegressor {
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn linear_calls(&self) -> usize {
        self.linear_calls.load(Ordering::SeqCst)
    }

    pub fn logistic_calls(&self) -> usize {
        self.logistic_calls.load(Ordering::SeqCst)
    }
}

impl Regressor for MockRegressor {
    fn fit_linear(&self, _samples: &[JoinSample]) -> Result<LinearFit, AnalysisError> {
        self.linear_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AnalysisError::Regression("Mock failure".to_string()));
        }
        Ok(self.linear)
    }

    fn fit_logistic(&self, _samples: &[JoinSample]) -> Result<LogisticFit, AnalysisError> {
        self.logistic_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AnalysisError::Regression("Mock failure".to_string()));
        }
        Ok(self.logistic)
    }
}

pub fn sample(country: &str, trade_share: f64, joined: bool) -> JoinSample {
    JoinSample {
        country: country.to_string(),
        trade_share,
        joined,
    }
}

pub fn dispute(id: i64, year: i32, country: &str, originator: bool, side: Side) -> DisputeRecord {
    DisputeRecord {
        dispute_id: id,
        start_year: year,
        country: country.to_string(),
        originator,
        side,
    }
}

pub fn trade(c1: &str, c2: &str, year: i32, flow1: f64, flow2: f64) -> TradeRecord {
    TradeRecord {
        country1: c1.to_string(),
        country2: c2.to_string(),
        year,
        flow1,
        flow2,
    }
}

/// A small 1914-style dispute (number 12) plus two edge-case disputes:
///
/// - 5 (1900): a lone side A originator, `AAA`, with no trade data.
/// - 20 (1920): side B has a participant but no originator.
///
/// Trade rows for 1913 include a both-unknown dyad (`GMY`-`BLG`) and rows
/// from 1912 that must be ignored.
pub fn july_crisis() -> Datasets {
    let disputes = vec![
        dispute(20, 1920, "XXX", true, Side::A),
        dispute(12, 1914, "AUH", true, Side::A),
        dispute(12, 1914, "SER", true, Side::B),
        dispute(12, 1914, "GMY", false, Side::A),
        dispute(12, 1914, "RUS", false, Side::B),
        dispute(12, 1914, "FRN", false, Side::B),
        dispute(12, 1914, "UKG", false, Side::B),
        dispute(5, 1900, "AAA", true, Side::A),
        dispute(20, 1920, "YYY", false, Side::B),
    ];

    let trades = vec![
        trade("AUH", "GMY", 1913, 50.0, 40.0),
        trade("AUH", "ITA", 1913, 20.0, 10.0),
        trade("AUH", "SER", 1913, 5.0, 5.0),
        trade("AUH", "RUS", 1913, 10.0, 10.0),
        trade("GMY", "RUS", 1913, 30.0, 30.0),
        trade("GMY", "UKG", 1913, 40.0, 50.0),
        trade("GMY", "ITA", 1913, 15.0, 15.0),
        trade("GMY", "BLG", 1913, -9.0, -9.0),
        trade("SER", "RUS", 1913, 8.0, 4.0),
        trade("SER", "FRN", 1913, 2.0, 2.0),
        trade("RUS", "FRN", 1913, 25.0, 25.0),
        trade("FRN", "UKG", 1913, 60.0, 60.0),
        trade("ITA", "FRN", 1913, 12.0, 12.0),
        trade("UKG", "USA", 1913, 70.0, 70.0),
        trade("AUH", "GMY", 1912, 1.0, 1.0),
        trade("SER", "BUL", 1912, 3.0, 3.0),
    ];

    Datasets::from_records(disputes, trades, true)
}
