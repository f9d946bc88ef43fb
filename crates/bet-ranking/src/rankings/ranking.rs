use serde::Serialize;

use super::domain::{Bet, BetId};
use super::scoring::{category_score, OverallVariant, ScoringConfig};

/// One row of a ranking with its 1-indexed position in the full ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub id: BetId,
    pub name: String,
    pub score: u8,
    pub position: usize,
}

/// Bets ordered by descending score; equal scores fall back to ascending bet id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    entries: Vec<RankedEntry>,
}

impl Ranking {
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (BetId, String, u8)>,
    {
        let mut scored: Vec<(BetId, String, u8)> = scores.into_iter().collect();
        scored.sort_by(|left, right| right.2.cmp(&left.2).then_with(|| left.0.cmp(&right.0)));

        let entries = scored
            .into_iter()
            .enumerate()
            .map(|(index, (id, name, score))| RankedEntry {
                id,
                name,
                score,
                position: index + 1,
            })
            .collect();

        Self { entries }
    }

    pub fn overall(bets: &[Bet], variant: OverallVariant, config: &ScoringConfig) -> Self {
        Self::from_scores(
            bets.iter()
                .map(|bet| (bet.id.clone(), bet.name.clone(), variant.score(bet, config))),
        )
    }

    /// Ranking on the fixed-tier score of a single category.
    pub fn by_category(bets: &[Bet], category: &str) -> Self {
        Self::from_scores(
            bets.iter()
                .map(|bet| (bet.id.clone(), bet.name.clone(), category_score(bet, category))),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry, for "show full ranking" views.
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RankedEntry> {
        self.entries
    }

    pub fn top(&self, count: usize) -> &[RankedEntry] {
        &self.entries[..count.min(self.entries.len())]
    }

    pub fn entry(&self, id: &BetId) -> Option<&RankedEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn position_of(&self, id: &BetId) -> Option<usize> {
        self.entry(id).map(|entry| entry.position)
    }

    /// Up to `count` entries ranked immediately ahead of `id`. Empty if `id` is not ranked.
    pub fn above(&self, id: &BetId, count: usize) -> &[RankedEntry] {
        match self.position_of(id) {
            Some(position) => {
                let end = position - 1;
                let start = end.saturating_sub(count);
                &self.entries[start..end]
            }
            None => &[],
        }
    }

    /// Up to `count` entries ranked immediately behind `id`. Empty if `id` is not ranked.
    pub fn below(&self, id: &BetId, count: usize) -> &[RankedEntry] {
        match self.position_of(id) {
            Some(position) => {
                let end = position.saturating_add(count).min(self.entries.len());
                &self.entries[position..end]
            }
            None => &[],
        }
    }

    pub fn window(&self, id: &BetId, count: usize) -> RankingWindow {
        RankingWindow {
            position: self.position_of(id),
            above: self.above(id, count).to_vec(),
            below: self.below(id, count).to_vec(),
        }
    }
}

/// Neighbourhood of a reference bet inside a ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankingWindow {
    pub position: Option<usize>,
    pub above: Vec<RankedEntry>,
    pub below: Vec<RankedEntry>,
}
