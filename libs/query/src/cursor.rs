//! Opaque search-after cursors.
//!
//! A cursor is the JSON array of the sort values of the last hit of a page,
//! encoded as URL-safe base64 with the `=` padding stripped so it can travel in
//! a query string without escaping.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// One sort key value as reported by the backend for a hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl SortValue {
    /// Convert a raw JSON value, rejecting arrays and objects.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(Self::Null),
            serde_json::Value::Bool(b) => Some(Self::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Self::UInt(u))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            serde_json::Value::String(s) => Some(Self::Text(s)),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Decoded search-after vector.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cursor {
    values: Vec<SortValue>,
}

impl Cursor {
    pub fn new(values: Vec<SortValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[SortValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<SortValue> {
        self.values
    }

    /// Encode to the token handed out to clients.
    pub fn encode(&self) -> Result<String> {
        encode(&self.values)
    }

    /// Decode a token previously produced by [`Cursor::encode`].
    pub fn decode(token: &str) -> Result<Self> {
        decode(token).map(Self::new)
    }
}

/// Encode sort values into an unpadded URL-safe token.
///
/// NaN and infinities have no JSON form and are rejected.
pub fn encode(values: &[SortValue]) -> Result<String> {
    if values
        .iter()
        .any(|v| matches!(v, SortValue::Float(f) if !f.is_finite()))
    {
        return Err(QueryError::InvalidCursor(
            "sort values must be finite numbers".to_string(),
        ));
    }
    let json = serde_json::to_vec(values)
        .map_err(|e| QueryError::InvalidCursor(format!("unencodable sort values: {e}")))?;
    let token = URL_SAFE.encode(json);
    Ok(token.trim_end_matches('=').to_string())
}

/// Decode a token into sort values.
pub fn decode(token: &str) -> Result<Vec<SortValue>> {
    let padded = restore_padding(token)?;
    let bytes = URL_SAFE
        .decode(padded.as_bytes())
        .map_err(|e| QueryError::InvalidCursor(format!("not valid base64: {e}")))?;

    let raw: Vec<serde_json::Value> = serde_json::from_slice(&bytes)
        .map_err(|e| QueryError::InvalidCursor(format!("not a sort value array: {e}")))?;
    if raw.is_empty() {
        return Err(QueryError::InvalidCursor("no sort values".to_string()));
    }

    raw.into_iter()
        .map(|v| {
            SortValue::from_json(v).ok_or_else(|| {
                QueryError::InvalidCursor("sort values must be scalars".to_string())
            })
        })
        .collect()
}

fn restore_padding(token: &str) -> Result<String> {
    if token.is_empty() {
        return Err(QueryError::InvalidCursor("empty token".to_string()));
    }
    match token.len() % 4 {
        0 => Ok(token.to_string()),
        2 => Ok(format!("{token}==")),
        3 => Ok(format!("{token}=")),
        _ => Err(QueryError::InvalidCursor(
            "token length is not a valid base64 length".to_string(),
        )),
    }
}
