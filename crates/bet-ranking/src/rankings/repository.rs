use super::domain::{Bet, BetId};

/// Data-access seam: the service only ever asks for the whole universe or one bet.
pub trait BetRepository: Send + Sync {
    fn all(&self) -> Result<Vec<Bet>, RepositoryError>;
    fn fetch(&self, id: &BetId) -> Result<Option<Bet>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
