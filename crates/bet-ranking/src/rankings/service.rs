use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::comparison::{
    CategoryPoint, ComparisonError, ComparisonReport, MAX_COMPARED, MIN_COMPARED,
};
use super::domain::{Bet, BetId};
use super::ranking::{RankedEntry, Ranking};
use super::repository::{BetRepository, RepositoryError};
use super::scoring::{
    category_score, flat_average_score, star_rating, OverallVariant, ScoringConfig,
};

pub const DEFAULT_TOP: usize = 10;
pub const DEFAULT_WINDOW: usize = 10;

/// Service composing the bet repository with the injected scoring configuration.
///
/// Each call loads the full universe and recomputes every score; nothing is cached.
pub struct RankingService<R> {
    repository: Arc<R>,
    config: Arc<ScoringConfig>,
}

/// Parameters for the listing view: top entries plus the neighbourhood of a reference bet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewQuery {
    pub variant: OverallVariant,
    pub top: usize,
    pub window: usize,
    pub reference: Option<BetId>,
}

impl Default for OverviewQuery {
    fn default() -> Self {
        Self {
            variant: OverallVariant::default(),
            top: DEFAULT_TOP,
            window: DEFAULT_WINDOW,
            reference: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingOverview {
    pub variant: OverallVariant,
    pub total: usize,
    pub top: Vec<RankedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<BetId>,
    pub position: Option<usize>,
    pub above: Vec<RankedEntry>,
    pub below: Vec<RankedEntry>,
}

/// Home dashboard card for a single bet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetDashboard {
    pub id: BetId,
    pub name: String,
    pub score: u8,
    pub star_rating: f64,
    pub position: Option<usize>,
    pub total: usize,
    pub categories: Vec<CategoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRanking {
    pub category: String,
    pub entries: Vec<RankedEntry>,
}

impl<R> RankingService<R>
where
    R: BetRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            repository,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Top-N listing plus the above/below windows around `query.reference`.
    pub fn overview(&self, query: &OverviewQuery) -> Result<RankingOverview, RankingServiceError> {
        let bets = self.repository.all()?;
        let ranking = Ranking::overall(&bets, query.variant, &self.config);

        let (position, above, below) = match &query.reference {
            Some(reference) => {
                let window = ranking.window(reference, query.window);
                if window.position.is_none() {
                    debug!(bet = %reference, "reference bet is not part of the ranking");
                }
                (window.position, window.above, window.below)
            }
            None => (None, Vec::new(), Vec::new()),
        };

        debug!(
            variant = query.variant.label(),
            bets = ranking.len(),
            ?position,
            "ranking overview computed"
        );

        Ok(RankingOverview {
            variant: query.variant,
            total: ranking.len(),
            top: ranking.top(query.top).to_vec(),
            reference: query.reference.clone(),
            position,
            above,
            below,
        })
    }

    pub fn full_ranking(
        &self,
        variant: OverallVariant,
    ) -> Result<Vec<RankedEntry>, RankingServiceError> {
        let bets = self.repository.all()?;
        Ok(Ranking::overall(&bets, variant, &self.config).into_entries())
    }

    /// Flat-average score, star rating, position and fixed-tier category breakdown of one bet.
    pub fn dashboard(&self, id: &BetId) -> Result<BetDashboard, RankingServiceError> {
        let bet = self
            .repository
            .fetch(id)?
            .ok_or_else(|| RankingServiceError::UnknownBet(id.clone()))?;
        let bets = self.repository.all()?;

        let ranking = Ranking::overall(&bets, OverallVariant::FlatAverage, &self.config);
        let score = flat_average_score(&bet);
        let categories = self
            .config
            .names()
            .map(|category| CategoryPoint {
                category: category.to_string(),
                score: category_score(&bet, category),
            })
            .collect();

        Ok(BetDashboard {
            id: bet.id,
            name: bet.name,
            score,
            star_rating: star_rating(score),
            position: ranking.position_of(id),
            total: ranking.len(),
            categories,
        })
    }

    pub fn category_top(
        &self,
        category: &str,
        count: usize,
    ) -> Result<CategoryRanking, RankingServiceError> {
        if !self.config.contains(category) {
            return Err(RankingServiceError::UnknownCategory(category.to_string()));
        }

        let bets = self.repository.all()?;
        let ranking = Ranking::by_category(&bets, category);
        debug!(category, bets = ranking.len(), "category ranking computed");

        Ok(CategoryRanking {
            category: category.to_string(),
            entries: ranking.top(count).to_vec(),
        })
    }

    /// Radar-chart comparison of 2-4 bets, in the order they were requested.
    pub fn compare(&self, ids: &[BetId]) -> Result<ComparisonReport, RankingServiceError> {
        if !(MIN_COMPARED..=MAX_COMPARED).contains(&ids.len()) {
            return Err(ComparisonError::InvalidSelection(ids.len()).into());
        }

        let bets = self.repository.all()?;
        let selection = ids
            .iter()
            .map(|id| find_bet(&bets, id).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComparisonReport::build(&selection, &self.config)?)
    }
}

fn find_bet<'a>(bets: &'a [Bet], id: &BetId) -> Result<&'a Bet, RankingServiceError> {
    bets.iter()
        .find(|bet| &bet.id == id)
        .ok_or_else(|| RankingServiceError::UnknownBet(id.clone()))
}

/// Error raised by the ranking service.
#[derive(Debug, thiserror::Error)]
pub enum RankingServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("bet '{0}' not found")]
    UnknownBet(BetId),
    #[error("category '{0}' is not configured")]
    UnknownCategory(String),
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}
