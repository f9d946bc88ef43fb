use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::rankings::domain::{Bet, BetId, Parameter, ParameterValues};
use crate::rankings::repository::{BetRepository, RepositoryError};
use crate::rankings::scoring::{CategoryWeight, ScoringConfig};
use crate::rankings::service::RankingService;

pub(super) const PAGAMENTOS: &str = "Pagamentos";
pub(super) const SUPORTE: &str = "Suporte";
pub(super) const BONUS: &str = "Bônus";

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::new(vec![
        CategoryWeight::new(PAGAMENTOS, 2.0),
        CategoryWeight::new(SUPORTE, 1.0),
        CategoryWeight::new(BONUS, 1.0),
    ])
    .expect("valid test config")
}

pub(super) fn boolean(name: &str, category: &str, value: bool) -> Parameter {
    Parameter::new(name, Some(category), ParameterValues::boolean(value))
}

pub(super) fn rating(name: &str, category: &str, stored: i32) -> Parameter {
    Parameter::new(name, Some(category), ParameterValues::rating(stored))
}

pub(super) fn number(name: &str, category: &str, value: f64) -> Parameter {
    Parameter::new(name, Some(category), ParameterValues::number(value))
}

pub(super) fn text(name: &str, category: &str, value: &str) -> Parameter {
    Parameter::new(name, Some(category), ParameterValues::text(value))
}

pub(super) fn empty(name: &str, category: &str) -> Parameter {
    Parameter::new(name, Some(category), ParameterValues::default())
}

/// A bet whose only parameters are curated category ratings.
pub(super) fn curated_bet(id: &str, overrides: &[(&str, i32)]) -> Bet {
    overrides
        .iter()
        .fold(Bet::new(id, format!("Bet {id}")), |bet, (category, stored)| {
            bet.with_parameter(Parameter::category_override(category, *stored))
        })
}

/// Four bets with distinct weighted scores: b1 > b2 > b3 > b4.
pub(super) fn catalog() -> Vec<Bet> {
    vec![
        curated_bet("b3", &[(PAGAMENTOS, 30), (SUPORTE, 30)])
            .with_parameter(boolean("pix", PAGAMENTOS, false)),
        curated_bet("b1", &[(PAGAMENTOS, 50), (SUPORTE, 45)])
            .with_parameter(boolean("pix", PAGAMENTOS, true))
            .with_parameter(rating("app", SUPORTE, 40)),
        curated_bet("b4", &[(PAGAMENTOS, 10)]).with_parameter(number("saque", PAGAMENTOS, 20.0)),
        curated_bet("b2", &[(PAGAMENTOS, 40), (SUPORTE, 40), (BONUS, 20)])
            .with_parameter(boolean("pix", PAGAMENTOS, true))
            .with_parameter(number("saque", PAGAMENTOS, 50.0)),
    ]
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    bets: Mutex<Vec<Bet>>,
}

impl MemoryRepository {
    pub(super) fn with_bets(bets: Vec<Bet>) -> Self {
        Self {
            bets: Mutex::new(bets),
        }
    }
}

impl BetRepository for MemoryRepository {
    fn all(&self) -> Result<Vec<Bet>, RepositoryError> {
        Ok(self.bets.lock().expect("repository mutex poisoned").clone())
    }

    fn fetch(&self, id: &BetId) -> Result<Option<Bet>, RepositoryError> {
        Ok(self
            .bets
            .lock()
            .expect("repository mutex poisoned")
            .iter()
            .find(|bet| &bet.id == id)
            .cloned())
    }
}

pub(super) struct UnavailableRepository;

impl BetRepository for UnavailableRepository {
    fn all(&self) -> Result<Vec<Bet>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &BetId) -> Result<Option<Bet>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service() -> Arc<RankingService<MemoryRepository>> {
    Arc::new(RankingService::new(
        Arc::new(MemoryRepository::with_bets(catalog())),
        scoring_config(),
    ))
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
