use serde::{Deserialize, Serialize};

use crate::rankings::domain::{Parameter, ParameterValue};

pub(crate) const BOOLEAN_TRUE_SCORE: f64 = 100.0;
pub(crate) const BOOLEAN_FALSE_SCORE: f64 = 30.0;
pub(crate) const TEXT_PRESENT_SCORE: f64 = 70.0;
pub(crate) const MAX_SCORE: f64 = 100.0;

/// How a stored rating (x10 units) is turned into a 0-100 score.
///
/// The dashboard and the filtered listings historically used different formulas. Both are
/// kept so every call site states which one it relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingNormalization {
    /// Dashboard formula: `stored * 2`.
    StoredTimesTwo,
    /// Listing and category formula: `(stored / 10) * 20`.
    StoredOverTen,
}

impl RatingNormalization {
    pub fn apply(self, stored: i32) -> f64 {
        let stored = f64::from(stored);
        let score = match self {
            Self::StoredTimesTwo => stored * 2.0,
            Self::StoredOverTen => (stored / 10.0) * 20.0,
        };
        score.clamp(0.0, MAX_SCORE)
    }
}

/// Score one parameter on the 0-100 scale, or `None` when it carries no value.
pub fn score_parameter(parameter: &Parameter, ratings: RatingNormalization) -> Option<f64> {
    parameter
        .values
        .resolve()
        .map(|value| score_value(value, ratings))
}

pub(crate) fn score_value(value: ParameterValue<'_>, ratings: RatingNormalization) -> f64 {
    match value {
        ParameterValue::Boolean(true) => BOOLEAN_TRUE_SCORE,
        ParameterValue::Boolean(false) => BOOLEAN_FALSE_SCORE,
        ParameterValue::Rating(stored) => ratings.apply(stored),
        ParameterValue::Number(value) => number_tier_score(value),
        ParameterValue::Text(_) => TEXT_PRESENT_SCORE,
    }
}

/// Fixed tiers: large amounts compress towards 100, mid values pass through, small values double.
pub fn number_tier_score(value: f64) -> f64 {
    let score = if value > 1000.0 {
        50.0 + (value / 10_000.0) * 50.0
    } else if value > 100.0 {
        value
    } else {
        value * 2.0
    };
    score.clamp(0.0, MAX_SCORE)
}
