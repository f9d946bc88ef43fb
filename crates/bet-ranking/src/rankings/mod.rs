//! Bet house scoring, ranking windows and side-by-side comparison.
//!
//! Data flows one way: the repository hands over the full universe of bets, the scoring
//! module turns parameters into category and overall scores, and [`Ranking`] orders the
//! result for the listing, dashboard and comparison views.

pub mod comparison;
pub mod domain;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use comparison::{
    CategoryAdvantage, CategoryPoint, ComparedBet, ComparisonError, ComparisonReport,
};
pub use domain::{Bet, BetId, Parameter, ParameterKind, ParameterValue, ParameterValues};
pub use ranking::{RankedEntry, Ranking, RankingWindow};
pub use repository::{BetRepository, RepositoryError};
pub use router::ranking_router;
pub use scoring::{
    category_score, flat_average_score, relative_category_score, score_parameter, star_rating,
    weighted_category_score, CategoryStrategy, CategoryWeight, OverallVariant, RatingNormalization,
    ScoringConfig, ScoringConfigError,
};
pub use service::{
    BetDashboard, CategoryRanking, OverviewQuery, RankingOverview, RankingService,
    RankingServiceError,
};
