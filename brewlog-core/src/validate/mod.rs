//! Recipe and review form validation.
//!
//! Each schema runs every one of its checks and returns either the typed
//! submission or a [`FieldErrors`] describing all violations at once. Which
//! recipe schema applies is decided by the caller from the brew type.

mod drip;
mod espresso;
mod fields;
mod review;

pub use drip::validate_drip;
pub use espresso::validate_espresso;
pub use review::validate_review;

use crate::error::FieldErrors;
use crate::form::FormData;
use crate::input::RecipeInput;
use crate::types::BrewType;

/// Inclusive numeric bounds for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const TITLE_MAX_CHARS: usize = 50;

/// Celsius.
pub const WATER_TEMPERATURE: Bounds = Bounds::new(80.0, 100.0);

/// Grams of ground coffee.
pub const COFFEE_AMOUNT: Bounds = Bounds::new(0.0, 30.0);

/// Applies to extraction time (seconds) and extraction amount (grams).
pub const EXTRACTION: Bounds = Bounds::new(0.0, 60.0);

/// Run the schema for `brew_type` against a submission.
pub fn validate_recipe(brew_type: BrewType, form: &FormData) -> Result<RecipeInput, FieldErrors> {
    match brew_type {
        BrewType::Espresso => validate_espresso(form).map(RecipeInput::Espresso),
        BrewType::Drip => validate_drip(form).map(RecipeInput::Drip),
    }
}
