use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a single submitted field was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    #[error("This field is required")]
    RequiredFieldMissing,

    #[error("Must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },

    #[error("Must be {max} characters or fewer")]
    TooLong { max: usize },

    #[error("Must be a number")]
    InvalidNumber,

    #[error("Must be greater than 0")]
    NotPositive,

    #[error("Must be one of: {}", .allowed.join(", "))]
    InvalidChoice { allowed: &'static [&'static str] },

    #[error("Has an unexpected format")]
    InvalidFormat,

    #[error("Enter an extraction time or a min/max range")]
    MissingExtractionTime,

    #[error("Enter an extraction amount or a min/max range")]
    MissingExtractionAmount,

    #[error("Minimum must be less than maximum")]
    InvalidRange,

    #[error("Enter the name of your grinder")]
    MissingCustomGrinderName,

    #[error("Enter the name of your dripper")]
    MissingCustomDripperName,

    #[error("Enter a grinder setting")]
    MissingGrinderSetting,
}

/// Every rule a submission violated, keyed by the field it came from.
///
/// Validators thread one of these through all of their checks and only look
/// at it once every check has run, so a single pass reports everything.
/// Serializes as `{ "field": ["message", ...] }` for display next to inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<String, Vec<FieldErrorKind>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, kind: FieldErrorKind) {
        self.0.entry(field.into()).or_default().push(kind);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct fields with at least one error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Errors recorded against `field`, empty if it passed.
    pub fn get(&self, field: &str) -> &[FieldErrorKind] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str, kind: &FieldErrorKind) -> bool {
        self.get(field).contains(kind)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Human-readable messages per field.
    pub fn messages(&self) -> BTreeMap<String, Vec<String>> {
        self.0
            .iter()
            .map(|(field, kinds)| {
                (
                    field.clone(),
                    kinds.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(
            f,
            "{} field(s) failed validation: {}",
            fields.len(),
            fields.join(", ")
        )
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.messages().serialize(serializer)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),
}
