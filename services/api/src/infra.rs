use bet_ranking::catalog::CatalogImporter;
use bet_ranking::error::AppError;
use bet_ranking::rankings::{Bet, BetId, BetRepository, RepositoryError, ScoringConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog snapshot held in memory; the whole universe is loaded once at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBetRepository {
    bets: Arc<RwLock<Vec<Bet>>>,
}

impl InMemoryBetRepository {
    pub(crate) fn from_bets(bets: Vec<Bet>) -> Self {
        Self {
            bets: Arc::new(RwLock::new(bets)),
        }
    }
}

impl BetRepository for InMemoryBetRepository {
    fn all(&self) -> Result<Vec<Bet>, RepositoryError> {
        let guard = self
            .bets
            .read()
            .map_err(|_| RepositoryError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn fetch(&self, id: &BetId) -> Result<Option<Bet>, RepositoryError> {
        let guard = self
            .bets
            .read()
            .map_err(|_| RepositoryError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(guard.iter().find(|bet| &bet.id == id).cloned())
    }
}

pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Vec<Bet>, AppError> {
    match path {
        Some(path) => {
            let bets = CatalogImporter::from_path(path)?;
            info!(path = %path.display(), bets = bets.len(), "bet catalog loaded");
            Ok(bets)
        }
        None => {
            warn!("no bet catalog configured; serving an empty ranking");
            Ok(Vec::new())
        }
    }
}

pub(crate) fn load_scoring_config(path: Option<&Path>) -> Result<ScoringConfig, AppError> {
    match path {
        Some(path) => {
            let config = ScoringConfig::from_path(path)?;
            info!(
                path = %path.display(),
                categories = config.categories.len(),
                "category weights loaded"
            );
            Ok(config)
        }
        None => Ok(ScoringConfig::standard()),
    }
}
