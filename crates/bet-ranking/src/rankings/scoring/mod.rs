//! Parameter scoring and the category/overall aggregators built on top of it.
//!
//! Everything here is a pure function of the bet data and the injected [`ScoringConfig`].

mod category;
mod config;
mod overall;
mod parameter;

pub use category::{category_score, relative_category_score, CategoryStrategy};
pub use config::{CategoryWeight, ScoringConfig, ScoringConfigError};
pub use overall::{flat_average_score, star_rating, weighted_category_score, OverallVariant};
pub use parameter::{number_tier_score, score_parameter, RatingNormalization};

/// Round half away from zero and pin to the 0-100 scale.
pub(crate) fn round_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
