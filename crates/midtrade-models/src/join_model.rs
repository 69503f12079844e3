use serde::{Deserialize, Serialize};

/// One regression observation: how much a country traded with the side's
/// instigator, and whether it ended up fighting on that side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinSample {
    pub country: String,
    /// Share of the country's total trade that went to the instigator.
    pub trade_share: f64,
    pub joined: bool,
}

impl JoinSample {
    pub fn joined_value(&self) -> f64 {
        if self.joined {
            1.0
        } else {
            0.0
        }
    }
}

/// Ordinary least squares line: `joined = slope * trade_share + intercept`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, trade_share: f64) -> f64 {
        self.slope * trade_share + self.intercept
    }
}

/// Logistic model: `P(joined) = 1 / (1 + exp(-(coefficient * trade_share + intercept)))`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LogisticFit {
    pub coefficient: f64,
    pub intercept: f64,
}

impl LogisticFit {
    pub fn probability(&self, trade_share: f64) -> f64 {
        1.0 / (1.0 + (-(self.coefficient * trade_share + self.intercept)).exp())
    }
}

/// Why a model could not be produced for a side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The side had fewer than two countries to build a trade matrix from.
    NoTradeMatrix,
    /// The side has no recorded originator.
    NoInstigator,
    TooFewSamples,
    /// Nobody joined the side.
    NoJoiners,
    /// Every candidate joined the side.
    AllJoined,
    /// Every sample has the same trade share, so there is no slope to fit.
    ConstantTradeShare,
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            UnavailableReason::NoTradeMatrix => "fewer than two countries with trade data",
            UnavailableReason::NoInstigator => "no instigator recorded for this side",
            UnavailableReason::TooFewSamples => "fewer than two candidate countries",
            UnavailableReason::NoJoiners => "no country joined this side",
            UnavailableReason::AllJoined => "every candidate country joined this side",
            UnavailableReason::ConstantTradeShare => "trade share with the instigator never varies",
        };
        f.write_str(msg)
    }
}

/// Result of a model fit that may legitimately be unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelOutcome<T> {
    Fitted { fit: T },
    Unavailable { reason: UnavailableReason },
}

impl<T> ModelOutcome<T> {
    pub fn unavailable(reason: UnavailableReason) -> Self {
        ModelOutcome::Unavailable { reason }
    }

    pub fn fitted(&self) -> Option<&T> {
        match self {
            ModelOutcome::Fitted { fit } => Some(fit),
            ModelOutcome::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ModelOutcome::Fitted { .. })
    }
}

/// Both regressions for one side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinModels {
    pub linear: ModelOutcome<LinearFit>,
    pub logistic: ModelOutcome<LogisticFit>,
}

impl JoinModels {
    pub fn unavailable(reason: UnavailableReason) -> Self {
        Self {
            linear: ModelOutcome::unavailable(reason),
            logistic: ModelOutcome::unavailable(reason),
        }
    }
}
