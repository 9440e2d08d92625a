//! Sort specifications.
//!
//! Sort expressions use the `field,-other` form: fields are comma separated and a
//! leading `-` sorts that field descending. Every specification ends with a
//! unique tiebreaker field so that search-after pagination sees a total order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QueryError, Result};

/// Unique field appended to every sort specification unless configured otherwise.
pub const DEFAULT_TIEBREAKER: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
}

impl SortField {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "-{}", self.field),
        }
    }
}

/// Ordered sort fields, always terminated by the tiebreaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    fields: Vec<SortField>,
}

impl SortSpec {
    /// Parse a sort expression using [`DEFAULT_TIEBREAKER`].
    pub fn parse(expr: Option<&str>) -> Result<Self> {
        Self::parse_with_tiebreaker(expr, DEFAULT_TIEBREAKER)
    }

    /// Parse a sort expression, appending `tiebreaker` ascending when it is missing.
    ///
    /// An absent or blank expression yields the tiebreaker alone.
    pub fn parse_with_tiebreaker(expr: Option<&str>, tiebreaker: &str) -> Result<Self> {
        let mut fields: Vec<SortField> = Vec::new();

        let expr = expr.map(str::trim).filter(|e| !e.is_empty());
        if let Some(expr) = expr {
            for raw in expr.split(',') {
                let token = raw.trim();
                let (name, direction) = match token.strip_prefix('-') {
                    Some(rest) => (rest.trim(), SortDirection::Desc),
                    None => (token, SortDirection::Asc),
                };

                if name.is_empty() {
                    return Err(QueryError::InvalidSortField(format!(
                        "empty field in sort expression '{expr}'"
                    )));
                }
                validate_field_name(name)?;
                if fields.iter().any(|f| f.field == name) {
                    return Err(QueryError::InvalidSortField(format!(
                        "field '{name}' appears more than once"
                    )));
                }

                fields.push(SortField {
                    field: name.to_string(),
                    direction,
                });
            }
        }

        Ok(Self::terminate(fields, tiebreaker))
    }

    /// Build from already-typed fields, applying the same tiebreaker policy as parsing.
    pub fn from_fields(fields: Vec<SortField>, tiebreaker: &str) -> Self {
        Self::terminate(fields, tiebreaker)
    }

    fn terminate(mut fields: Vec<SortField>, tiebreaker: &str) -> Self {
        match fields.iter().position(|f| f.field == tiebreaker) {
            // Fields after a unique key can never change the order.
            Some(pos) => fields.truncate(pos + 1),
            None => fields.push(SortField::asc(tiebreaker)),
        }
        Self { fields }
    }

    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The unique field ending the specification.
    pub fn tiebreaker(&self) -> &SortField {
        // `terminate` always leaves at least the tiebreaker in place.
        &self.fields[self.fields.len() - 1]
    }

    /// Render as the backend `sort` argument.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.fields
                .iter()
                .map(|f| {
                    serde_json::json!({
                        f.field.clone(): { "order": f.direction.as_str() }
                    })
                })
                .collect(),
        )
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(","))
    }
}

fn validate_field_name(name: &str) -> Result<()> {
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && !name.split('.').any(str::is_empty);
    if valid {
        Ok(())
    } else {
        Err(QueryError::InvalidSortField(format!(
            "'{name}' is not a valid field name"
        )))
    }
}
