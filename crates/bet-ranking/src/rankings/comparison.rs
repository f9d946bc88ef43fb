use std::collections::HashSet;

use serde::Serialize;

use super::domain::{Bet, BetId};
use super::scoring::{relative_category_score, ScoringConfig};

pub const MIN_COMPARED: usize = 2;
pub const MAX_COMPARED: usize = 4;

/// Side-by-side category profile for a small selection of bets, as drawn on the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub bets: Vec<ComparedBet>,
    pub advantages: Vec<CategoryAdvantage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparedBet {
    pub id: BetId,
    pub name: String,
    pub categories: Vec<CategoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPoint {
    pub category: String,
    pub score: u8,
}

/// Which bet leads a category and by how much. `leader` is `None` when the top scores tie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAdvantage {
    pub category: String,
    pub leader: Option<BetId>,
    pub runner_up: Option<BetId>,
    pub margin: u8,
    /// Margin as a percentage of the runner-up score, one decimal place.
    pub margin_percent: Option<f64>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("comparison needs between 2 and 4 bets, got {0}")]
    InvalidSelection(usize),
    #[error("bet '{0}' was selected more than once")]
    DuplicateBet(BetId),
}

impl ComparisonReport {
    /// Score every configured category for each bet relative to the rest of the selection.
    pub fn build(bets: &[Bet], config: &ScoringConfig) -> Result<Self, ComparisonError> {
        if !(MIN_COMPARED..=MAX_COMPARED).contains(&bets.len()) {
            return Err(ComparisonError::InvalidSelection(bets.len()));
        }

        let mut seen = HashSet::new();
        for bet in bets {
            if !seen.insert(&bet.id) {
                return Err(ComparisonError::DuplicateBet(bet.id.clone()));
            }
        }

        let compared: Vec<ComparedBet> = bets
            .iter()
            .map(|bet| ComparedBet {
                id: bet.id.clone(),
                name: bet.name.clone(),
                categories: config
                    .names()
                    .map(|category| CategoryPoint {
                        category: category.to_string(),
                        score: relative_category_score(bet, category, bets),
                    })
                    .collect(),
            })
            .collect();

        let advantages = config
            .names()
            .enumerate()
            .map(|(index, category)| advantage_for(category, index, &compared))
            .collect();

        Ok(Self {
            bets: compared,
            advantages,
        })
    }
}

fn advantage_for(category: &str, index: usize, compared: &[ComparedBet]) -> CategoryAdvantage {
    let mut scores: Vec<(&BetId, u8)> = compared
        .iter()
        .map(|bet| (&bet.id, bet.categories[index].score))
        .collect();
    scores.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(right.0)));

    let (first_id, first) = scores[0];
    let (second_id, second) = scores[1];

    if first == second {
        return CategoryAdvantage {
            category: category.to_string(),
            leader: None,
            runner_up: None,
            margin: 0,
            margin_percent: None,
        };
    }

    let margin = first - second;
    let margin_percent = (second > 0)
        .then(|| (f64::from(margin) / f64::from(second) * 1000.0).round() / 10.0);

    CategoryAdvantage {
        category: category.to_string(),
        leader: Some(first_id.clone()),
        runner_up: Some(second_id.clone()),
        margin,
        margin_percent,
    }
}
