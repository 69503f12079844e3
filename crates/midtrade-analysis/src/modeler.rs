use linfa::prelude::*;
use linfa_linear::LinearRegression;
use linfa_logistic::LogisticRegression;
use midtrade_models::{
    JoinModels, JoinSample, LinearFit, LogisticFit, ModelOutcome, TradeShareMatrix,
    UnavailableReason,
};
use ndarray::{Array1, Array2};
use tracing::debug;

use crate::error::AnalysisError;

/// Curve fitting backend. Mockable for testing.
pub trait Regressor: Send + Sync {
    fn fit_linear(&self, samples: &[JoinSample]) -> Result<LinearFit, AnalysisError>;
    fn fit_logistic(&self, samples: &[JoinSample]) -> Result<LogisticFit, AnalysisError> {
        let records = design_matrix(samples)?;
        let targets: Array1<bool> = samples.iter().map(|s| s.joined).collect();
        let dataset = Dataset::new(records, targets);

        let model = LogisticRegression::default()
            .max_iterations(self.max_iterations)
            .fit(&dataset)
            .map_err(|e| AnalysisError::Regression(e.to_string()))?;

        let fit = LogisticFit {
            coefficient: model.params()[0],
            intercept: model.intercept(),
        };
        Ok(orient_to_joined(fit, model.labels().pos.class))
    }
}

fn design_matrix(samples: &[JoinSample]) -> Result<Array2<f64>, AnalysisError> {
    let xs: Vec<f64> = samples.iter().map(|s| s.trade_share).collect();
    Array2::from_shape_vec((samples.len(), 1), xs)
        .map_err(|e| AnalysisError::Regression(e.to_string()))
}

/// linfa picks which label is the positive class. Negate the parameters when
/// it picked `joined == false`, so the fit always gives P(joined).
fn orient_to_joined(fit: LogisticFit, positive_class: bool) -> LogisticFit {
    if positive_class {
        fit
    } else {
        LogisticFit {
            coefficient: -fit.coefficient,
            intercept: -fit.intercept,
        }
    }
}

/// Build one sample per non-instigator country in the share matrix.
///
/// The predictor is the country's trade share with the side's first
/// instigator, or 0 when the two did not trade. Returns `None` when the side
/// has no instigator to measure against.
pub fn assemble_join_samples(
    shares: &TradeShareMatrix,
    combatants: &[String],
    instigators: &[String],
) -> Option<Vec<JoinSample>> {
    let instigator = instigators.first()?;

    let samples = shares
        .countries()
        .filter(|country| !instigators.contains(country))
        .map(|country| JoinSample {
            country: country.clone(),
            trade_share: shares.share(country, instigator).unwrap_or(0.0),
            joined: combatants.contains(country),
        })
        .collect();

    Some(samples)
}

/// Fit both regressions, reporting degenerate samples as unavailable instead
/// of handing them to the backend.
pub fn fit_join_models(
    regressor: &dyn Regressor,
    samples: &[JoinSample],
) -> Result<JoinModels, AnalysisError> {
    if samples.len() < 2 {
        return Ok(JoinModels::unavailable(UnavailableReason::TooFewSamples));
    }

    let constant_share = samples
        .iter()
        .all(|s| s.trade_share == samples[0].trade_share);
    let joined = samples.iter().filter(|s| s.joined).count();

    let linear = if constant_share {
        ModelOutcome::unavailable(UnavailableReason::ConstantTradeShare)
    } else {
        ModelOutcome::Fitted {
            fit: regressor.fit_linear(samples)?,
        }
    };

    let logistic = if joined == 0 {
        ModelOutcome::unavailable(UnavailableReason::NoJoiners)
    } else if joined == samples.len() {
        ModelOutcome::unavailable(UnavailableReason::AllJoined)
    } else if constant_share {
        ModelOutcome::unavailable(UnavailableReason::ConstantTradeShare)
    } else {
        ModelOutcome::Fitted {
            fit: regressor.fit_logistic(samples)?,
        }
    };

    debug!(
        samples = samples.len(),
        joined,
        linear = linear.is_available(),
        logistic = logistic.is_available(),
        "Fitted join models"
    );

    Ok(JoinModels { linear, logistic })
}
