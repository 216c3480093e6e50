use crate::error::{FieldErrorKind, FieldErrors};
use crate::form::FormData;
use crate::input::ReviewInput;
use crate::types::Rating;

/// Validate a review submission: a whole-star `rating` and optional `content`.
pub fn validate_review(form: &FormData) -> Result<ReviewInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let rating = match form.number("rating") {
        Ok(Some(value)) if value.fract() != 0.0 => {
            errors.push("rating", FieldErrorKind::InvalidNumber);
            None
        }
        Ok(Some(value)) => match Rating::try_from(value as i64) {
            Ok(rating) => Some(rating),
            Err(_) => {
                errors.push(
                    "rating",
                    FieldErrorKind::OutOfRange {
                        min: f64::from(Rating::MIN),
                        max: f64::from(Rating::MAX),
                    },
                );
                None
            }
        },
        Ok(None) => {
            errors.push("rating", FieldErrorKind::RequiredFieldMissing);
            None
        }
        Err(kind) => {
            errors.push("rating", kind);
            None
        }
    };

    let content = form.text("content").unwrap_or_else(|kind| {
        errors.push("content", kind);
        None
    });

    match rating {
        Some(rating) if errors.is_empty() => Ok(ReviewInput { rating, content }),
        _ => Err(errors),
    }
}
