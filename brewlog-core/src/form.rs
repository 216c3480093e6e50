//! Flat form submissions.
//!
//! Clients post recipe forms as a map of field name to value. Most values are
//! strings straight from inputs; structured fields such as `extractionSteps`
//! arrive already decoded into a JSON list. Any other JSON shape is kept as
//! submitted so the field it sits under can be reported, instead of failing
//! the whole form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FieldErrorKind;

/// A single submitted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(Map<String, Value>),
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<Vec<Value>> for FormValue {
    fn from(value: Vec<Value>) -> Self {
        FormValue::List(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<Map<String, Value>> for FormValue {
    fn from(value: Map<String, Value>) -> Self {
        FormValue::Object(value)
    }
}

/// Field name to submitted value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, FormValue>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FormValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<FormValue> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&FormValue> {
        self.0.get(field)
    }

    /// Trimmed text value.
    ///
    /// `Ok(None)` when the field is absent or blank, `Err(InvalidFormat)` when
    /// it holds a list, object or boolean rather than something typed in.
    pub fn text(&self, field: &str) -> Result<Option<String>, FieldErrorKind> {
        match self.get(field) {
            None | Some(FormValue::Null) => Ok(None),
            Some(FormValue::Text(s)) => {
                let trimmed = s.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Some(FormValue::Number(n)) => Ok(Some(n.to_string())),
            Some(FormValue::Bool(_) | FormValue::List(_) | FormValue::Object(_)) => {
                Err(FieldErrorKind::InvalidFormat)
            }
        }
    }

    /// Whether the user filled the field in at all, valid or not.
    pub fn is_present(&self, field: &str) -> bool {
        match self.get(field) {
            None | Some(FormValue::Null) => false,
            Some(FormValue::Text(s)) => !s.trim().is_empty(),
            Some(FormValue::Number(_) | FormValue::Bool(_)) => true,
            Some(FormValue::List(items)) => !items.is_empty(),
            Some(FormValue::Object(entries)) => !entries.is_empty(),
        }
    }

    /// Numeric value of a field.
    ///
    /// `Ok(None)` when the field is absent or blank, `Err(InvalidNumber)` when
    /// something was entered that is not a finite decimal.
    pub fn number(&self, field: &str) -> Result<Option<f64>, FieldErrorKind> {
        match self.get(field) {
            None | Some(FormValue::Null) => Ok(None),
            Some(FormValue::Number(n)) => finite(*n).map(Some),
            Some(FormValue::Text(s)) => parse_decimal(s),
            Some(FormValue::Bool(_) | FormValue::List(_) | FormValue::Object(_)) => {
                Err(FieldErrorKind::InvalidNumber)
            }
        }
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (field, value) in iter {
            form.insert(field, value);
        }
        form
    }
}

/// Coerce a JSON value (a number, or a decimal in a string) to a number.
///
/// Same tri-state contract as [`FormData::number`].
pub fn coerce_number(value: &Value) -> Result<Option<f64>, FieldErrorKind> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .ok_or(FieldErrorKind::InvalidNumber)
            .and_then(finite)
            .map(Some),
        Value::String(s) => parse_decimal(s),
        _ => Err(FieldErrorKind::InvalidNumber),
    }
}

fn parse_decimal(raw: &str) -> Result<Option<f64>, FieldErrorKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| FieldErrorKind::InvalidNumber)
        .and_then(finite)
        .map(Some)
}

fn finite(n: f64) -> Result<f64, FieldErrorKind> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(FieldErrorKind::InvalidNumber)
    }
}
