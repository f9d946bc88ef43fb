use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Category enumeration and weight table injected into the aggregators.
///
/// The order of `categories` is the enumeration order used by every per-category listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub categories: Vec<CategoryWeight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub name: String,
    pub weight: f64,
}

impl CategoryWeight {
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
        }
    }
}

impl ScoringConfig {
    /// Category table used by the public comparison site.
    pub fn standard() -> Self {
        Self {
            categories: vec![
                CategoryWeight::new("Segurança & Licenciamento", 1.5),
                CategoryWeight::new("Pagamentos & Financeiro", 1.3),
                CategoryWeight::new("Odds & Mercados", 1.2),
                CategoryWeight::new("Bônus & Promoções", 1.0),
                CategoryWeight::new("Atendimento & Suporte", 0.8),
                CategoryWeight::new("Experiência do Usuário", 0.7),
            ],
        }
    }

    pub fn new(categories: Vec<CategoryWeight>) -> Result<Self, ScoringConfigError> {
        let config = Self { categories };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoringConfigError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScoringConfigError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if self.categories.is_empty() {
            return Err(ScoringConfigError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.name.as_str()) {
                return Err(ScoringConfigError::DuplicateCategory(category.name.clone()));
            }
            if !category.weight.is_finite() || category.weight <= 0.0 {
                return Err(ScoringConfigError::InvalidWeight {
                    category: category.name.clone(),
                    weight: category.weight,
                });
            }
        }

        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.weight(category).is_some()
    }

    pub fn weight(&self, category: &str) -> Option<f64> {
        self.categories
            .iter()
            .find(|entry| entry.name == category)
            .map(|entry| entry.weight)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Failure loading or validating a weight table.
#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("failed to read scoring config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scoring config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scoring config must list at least one category")]
    Empty,
    #[error("category '{0}' is listed more than once")]
    DuplicateCategory(String),
    #[error("category '{category}' has invalid weight {weight}; weights must be positive")]
    InvalidWeight { category: String, weight: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_table_is_valid_and_ordered() {
        let config = ScoringConfig::standard();
        config.validate().expect("standard table validates");
        assert_eq!(config.names().next(), Some("Segurança & Licenciamento"));
        assert_eq!(config.weight("Pagamentos & Financeiro"), Some(1.3));
        assert!(!config.contains("Cassino Ao Vivo"));
    }

    #[test]
    fn from_reader_parses_json_table() {
        let json = r#"{"categories":[{"name":"Pagamentos","weight":2.0},{"name":"Suporte","weight":0.5}]}"#;
        let config = ScoringConfig::from_reader(Cursor::new(json)).expect("parses");
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.weight("Suporte"), Some(0.5));
    }

    #[test]
    fn rejects_non_positive_weights() {
        let json = r#"{"categories":[{"name":"Pagamentos","weight":0.0}]}"#;
        match ScoringConfig::from_reader(Cursor::new(json)) {
            Err(ScoringConfigError::InvalidWeight { category, .. }) => {
                assert_eq!(category, "Pagamentos")
            }
            other => panic!("expected invalid weight, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicates_and_empty_tables() {
        let duplicate = ScoringConfig::new(vec![
            CategoryWeight::new("Pagamentos", 1.0),
            CategoryWeight::new("Pagamentos", 2.0),
        ]);
        assert!(matches!(
            duplicate,
            Err(ScoringConfigError::DuplicateCategory(name)) if name == "Pagamentos"
        ));
        assert!(matches!(
            ScoringConfig::new(Vec::new()),
            Err(ScoringConfigError::Empty)
        ));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        match ScoringConfig::from_path("./does-not-exist.json") {
            Err(ScoringConfigError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
