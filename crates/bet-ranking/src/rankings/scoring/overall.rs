use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use super::parameter::{score_parameter, RatingNormalization};
use super::round_score;
use crate::rankings::domain::Bet;

/// The two overall-score algorithms. They can disagree on the same bet and are kept apart
/// on purpose; callers pick one by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallVariant {
    /// Mean of every parameter score, curated ratings included, as shown on the home dashboard.
    FlatAverage,
    /// Weighted mean of the curated per-category ratings, as used by filtered listings.
    #[default]
    WeightedCategories,
}

impl OverallVariant {
    pub fn score(self, bet: &Bet, config: &ScoringConfig) -> u8 {
        match self {
            Self::FlatAverage => flat_average_score(bet),
            Self::WeightedCategories => weighted_category_score(bet, config),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FlatAverage => "flat_average",
            Self::WeightedCategories => "weighted_categories",
        }
    }
}

impl std::str::FromStr for OverallVariant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "flat" | "flat_average" | "home" => Ok(Self::FlatAverage),
            "weighted" | "weighted_categories" | "filtered" => Ok(Self::WeightedCategories),
            other => Err(format!(
                "unknown scoring variant '{other}' (expected 'flat' or 'weighted')"
            )),
        }
    }
}

/// Home-dashboard score: rounded mean over every parameter regardless of category.
///
/// Curated category ratings count as ordinary rated parameters here.
pub fn flat_average_score(bet: &Bet) -> u8 {
    let (sum, count) = bet
        .parameters
        .iter()
        .filter_map(|parameter| score_parameter(parameter, RatingNormalization::StoredTimesTwo))
        .fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));

    if count == 0 {
        return 0;
    }
    round_score(sum / count as f64)
}

/// Convert a 0-100 score to stars, rounded to the nearest half star.
pub fn star_rating(score: u8) -> f64 {
    ((f64::from(score) / 20.0) * 2.0).round() / 2.0
}

/// Listing score: weighted mean of the curated category ratings only.
///
/// Categories without a curated rating add nothing to either side of the division.
pub fn weighted_category_score(bet: &Bet, config: &ScoringConfig) -> u8 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for category in &config.categories {
        let Some(stored) = bet.category_override(&category.name) else {
            continue;
        };
        let rating_in_100 = (f64::from(stored) / 10.0 / 5.0) * 100.0;
        weighted_sum += rating_in_100 * category.weight;
        total_weight += category.weight;
    }

    if total_weight <= 0.0 {
        return 0;
    }
    round_score(weighted_sum / total_weight)
}
