use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One row of the parameter export, already trimmed and with blank cells as `None`.
#[derive(Debug)]
pub(crate) struct CatalogRow {
    pub(crate) line: u64,
    pub(crate) bet_id: Option<String>,
    pub(crate) bet_name: Option<String>,
    pub(crate) parameter: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) unit: Option<String>,
    pub(crate) value_boolean: Option<String>,
    pub(crate) value_rating: Option<i32>,
    pub(crate) value_number: Option<f64>,
    pub(crate) value_text: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CatalogRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or_default();
        let row: RawRow = record.deserialize(Some(&headers))?;
        rows.push(row.into_catalog_row(line));
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bet_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bet_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    parameter: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    unit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value_boolean: Option<String>,
    #[serde(default)]
    value_rating: Option<i32>,
    #[serde(default)]
    value_number: Option<f64>,
    #[serde(default)]
    value_text: Option<String>,
}

impl RawRow {
    fn into_catalog_row(self, line: u64) -> CatalogRow {
        CatalogRow {
            line,
            bet_id: self.bet_id,
            bet_name: self.bet_name,
            parameter: self.parameter,
            category: self.category,
            unit: self.unit,
            value_boolean: self.value_boolean,
            value_rating: self.value_rating,
            value_number: self.value_number,
            value_text: self.value_text,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts the spellings the admin export produces for boolean cells.
pub(crate) fn parse_boolean(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "sim" | "yes" => Some(true),
        "false" | "0" | "não" | "nao" | "no" => Some(false),
        _ => None,
    }
}
