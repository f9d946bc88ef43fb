//! Import of the bet catalog from the admin back-office CSV export.
//!
//! The export holds one row per parameter:
//! `bet_id,bet_name,parameter,category,unit,value_boolean,value_rating,value_number,value_text`.
//! A row with an empty `parameter` only declares the bet.

mod parser;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::rankings::domain::{Bet, BetId, Parameter, ParameterKind, ParameterValues};
use parser::CatalogRow;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingBetId { line: u64 },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read bet catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid bet catalog CSV data: {}", err),
            CatalogImportError::MissingBetId { line } => {
                write!(f, "bet catalog row on line {} has no bet_id", line)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::MissingBetId { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Bet>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Group parameter rows into bets, keeping the order in which bets first appear.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Bet>, CatalogImportError> {
        let mut bets: Vec<Bet> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for row in parser::parse_rows(reader)? {
            let Some(bet_id) = row.bet_id.clone() else {
                return Err(CatalogImportError::MissingBetId { line: row.line });
            };

            let slot = *index.entry(bet_id.clone()).or_insert_with(|| {
                bets.push(Bet {
                    id: BetId(bet_id.clone()),
                    name: bet_id.clone(),
                    parameters: Vec::new(),
                });
                bets.len() - 1
            });

            apply_row(&mut bets[slot], row);
        }

        debug!(bets = bets.len(), "bet catalog imported");
        Ok(bets)
    }
}

fn apply_row(bet: &mut Bet, row: CatalogRow) {
    if let Some(name) = row.bet_name {
        if bet.name == bet.id.0 {
            bet.name = name;
        }
    }

    let Some(parameter_name) = row.parameter else {
        return;
    };

    let boolean = row
        .value_boolean
        .as_deref()
        .and_then(|raw| match parser::parse_boolean(raw) {
            Some(value) => Some(value),
            None => {
                warn!(
                    line = row.line,
                    value = raw,
                    "unrecognized boolean in bet catalog, treating as empty"
                );
                None
            }
        });

    let number = row.value_number.filter(|value| {
        if !value.is_finite() {
            warn!(
                line = row.line,
                value = %value,
                "non-finite number in bet catalog, treating as empty"
            );
        }
        value.is_finite()
    });

    bet.parameters.push(Parameter {
        kind: ParameterKind::from_name(&parameter_name),
        category: row.category,
        unit: row.unit,
        values: ParameterValues {
            boolean,
            rating: row.value_rating,
            number,
            text: row.value_text,
        },
    });
}
