use serde::{Deserialize, Serialize};

use super::parameter::{score_value, RatingNormalization, MAX_SCORE};
use super::round_score;
use crate::rankings::domain::{Bet, Parameter, ParameterValue};

const RELATIVE_FLOOR: f64 = 30.0;
const RELATIVE_SPAN: f64 = 70.0;
const RELATIVE_FLAT: f64 = 70.0;
const FILL_RATE_BONUS: f64 = 10.0;

/// Per-category aggregation strategies. They are not interchangeable: fixed tiers rank a
/// single bet against the catalog, the relative strategy feeds side-by-side comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStrategy {
    FixedTier,
    RelativeWithFillBonus,
}

impl CategoryStrategy {
    /// `comparison` is only consulted by the relative strategy.
    pub fn score(self, bet: &Bet, category: &str, comparison: &[Bet]) -> u8 {
        match self {
            Self::FixedTier => category_score(bet, category),
            Self::RelativeWithFillBonus => relative_category_score(bet, category, comparison),
        }
    }
}

/// Rounded mean of the scored parameters in `category`; 0 when none carries a value.
pub fn category_score(bet: &Bet, category: &str) -> u8 {
    let tally = bet
        .parameters_in(category)
        .filter_map(|parameter| {
            parameter
                .values
                .resolve()
                .map(|value| score_value(value, RatingNormalization::StoredOverTen))
        })
        .fold(Tally::default(), Tally::add);

    tally.mean().map(round_score).unwrap_or(0)
}

/// Category score where numbers are placed on the min/max range of the same parameter across
/// `comparison`, plus a bonus proportional to how many parameters are filled in.
pub fn relative_category_score(bet: &Bet, category: &str, comparison: &[Bet]) -> u8 {
    let mut total = 0usize;
    let mut tally = Tally::default();

    for parameter in bet.parameters_in(category) {
        total += 1;
        let Some(value) = parameter.values.resolve() else {
            continue;
        };
        let score = match value {
            ParameterValue::Number(number) => relative_number_score(parameter, number, comparison),
            other => score_value(other, RatingNormalization::StoredOverTen),
        };
        tally = tally.add(score);
    }

    let Some(mean) = tally.mean() else {
        return 0;
    };

    let bonus = (tally.count as f64 / total as f64) * FILL_RATE_BONUS;
    round_score((mean + bonus).min(MAX_SCORE))
}

fn relative_number_score(parameter: &Parameter, value: f64, comparison: &[Bet]) -> f64 {
    let name = parameter.name();
    let (min, max) = comparison
        .iter()
        .flat_map(|bet| bet.regular_parameters())
        .filter(|candidate| candidate.name() == name)
        .filter_map(|candidate| match candidate.values.resolve() {
            Some(ParameterValue::Number(number)) => Some(number),
            _ => None,
        })
        .chain(std::iter::once(value))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), number| {
            (min.min(number), max.max(number))
        });

    if max > min {
        RELATIVE_FLOOR + ((value - min) / (max - min)) * RELATIVE_SPAN
    } else {
        RELATIVE_FLAT
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    sum: f64,
    count: usize,
}

impl Tally {
    fn add(self, score: f64) -> Self {
        Self {
            sum: self.sum + score,
            count: self.count + 1,
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}
