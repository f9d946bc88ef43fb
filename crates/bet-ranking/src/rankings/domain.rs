use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved name prefix the catalog uses for curated per-category ratings.
pub const CATEGORY_OVERRIDE_PREFIX: &str = "__category_rating_";

/// Identifier wrapper for ranked bet houses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BetId(pub String);

impl BetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A regulated bet house together with every parameter the catalog holds for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Bet {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: BetId::new(id),
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Regular parameters tagged with `category`, in catalog order.
    pub fn parameters_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Parameter> {
        self.regular_parameters()
            .filter(move |parameter| parameter.category.as_deref() == Some(category))
    }

    pub fn regular_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|parameter| matches!(parameter.kind, ParameterKind::Regular { .. }))
    }

    /// The first curated rating recorded for `category`, still in stored (x10) units.
    pub fn category_override(&self, category: &str) -> Option<i32> {
        self.parameters.iter().find_map(|parameter| match &parameter.kind {
            ParameterKind::CategoryOverride { category: tagged } if tagged == category => {
                parameter.values.rating
            }
            _ => None,
        })
    }
}

/// What a parameter row stands for once the reserved naming convention is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Regular { name: String },
    CategoryOverride { category: String },
}

impl ParameterKind {
    pub fn from_name(name: &str) -> Self {
        match name.strip_prefix(CATEGORY_OVERRIDE_PREFIX) {
            Some(category) if !category.is_empty() => Self::CategoryOverride {
                category: category.to_string(),
            },
            _ => Self::Regular {
                name: name.to_string(),
            },
        }
    }

    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Regular { name } => Cow::Borrowed(name),
            Self::CategoryOverride { category } => {
                Cow::Owned(format!("{CATEGORY_OVERRIDE_PREFIX}{category}"))
            }
        }
    }
}

/// The four typed value slots exactly as the catalog stores them.
///
/// `rating` is kept in stored units, ten times the 0-5 star rating (45 means 4.5).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterValues {
    pub boolean: Option<bool>,
    pub rating: Option<i32>,
    pub number: Option<f64>,
    pub text: Option<String>,
}

impl ParameterValues {
    pub fn boolean(value: bool) -> Self {
        Self {
            boolean: Some(value),
            ..Self::default()
        }
    }

    pub fn rating(stored: i32) -> Self {
        Self {
            rating: Some(stored),
            ..Self::default()
        }
    }

    pub fn number(value: f64) -> Self {
        Self {
            number: Some(value),
            ..Self::default()
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: Some(value.into()),
            ..Self::default()
        }
    }

    /// Pick the first populated slot in boolean, rating, number, text order.
    ///
    /// Whitespace-only text counts as absent.
    pub fn resolve(&self) -> Option<ParameterValue<'_>> {
        if let Some(value) = self.boolean {
            return Some(ParameterValue::Boolean(value));
        }
        if let Some(stored) = self.rating {
            return Some(ParameterValue::Rating(stored));
        }
        if let Some(value) = self.number {
            return Some(ParameterValue::Number(value));
        }
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ParameterValue::Text)
    }
}

/// The single value a parameter contributes to scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue<'a> {
    Boolean(bool),
    Rating(i32),
    Number(f64),
    Text(&'a str),
}

/// One typed attribute of a bet house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParameterRecord", into = "ParameterRecord")]
pub struct Parameter {
    pub kind: ParameterKind,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub values: ParameterValues,
}

impl Parameter {
    pub fn new(name: &str, category: Option<&str>, values: ParameterValues) -> Self {
        Self {
            kind: ParameterKind::from_name(name),
            category: category.map(str::to_string),
            unit: None,
            values,
        }
    }

    pub fn category_override(category: &str, stored_rating: i32) -> Self {
        Self {
            kind: ParameterKind::CategoryOverride {
                category: category.to_string(),
            },
            category: None,
            unit: None,
            values: ParameterValues::rating(stored_rating),
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn name(&self) -> Cow<'_, str> {
        self.kind.name()
    }
}

/// Wire shape of a parameter, matching the catalog's column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParameterRecord {
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    value_boolean: Option<bool>,
    #[serde(default)]
    value_rating: Option<i32>,
    #[serde(default)]
    value_number: Option<f64>,
    #[serde(default)]
    value_text: Option<String>,
}

impl From<ParameterRecord> for Parameter {
    fn from(record: ParameterRecord) -> Self {
        Self {
            kind: ParameterKind::from_name(&record.name),
            category: record.category,
            unit: record.unit,
            values: ParameterValues {
                boolean: record.value_boolean,
                rating: record.value_rating,
                number: record.value_number,
                text: record.value_text,
            },
        }
    }
}

impl From<Parameter> for ParameterRecord {
    fn from(parameter: Parameter) -> Self {
        Self {
            name: parameter.kind.name().into_owned(),
            category: parameter.category,
            unit: parameter.unit,
            value_boolean: parameter.values.boolean,
            value_rating: parameter.values.rating,
            value_number: parameter.values.number,
            value_text: parameter.values.text,
        }
    }
}
