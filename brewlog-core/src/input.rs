//! Submissions that passed validation, ready to persist.

use serde::Serialize;

use crate::types::{
    BrewType, DripParams, DripStep, DripType, Equipment, EspressoParams, Grind, Measure, Rating,
    RecipeParams,
};

/// Text fields shared by both recipe kinds. Blank optional text is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeBasics {
    pub title: String,
    pub description: Option<String>,
    pub bean: Option<String>,
    pub tips: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EspressoRecipeInput {
    #[serde(flatten)]
    pub basics: RecipeBasics,
    pub water_temperature: f64,
    pub coffee_amount: f64,
    pub extraction_time: Measure,
    pub extraction_amount: Measure,
    pub grind: Option<Grind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DripRecipeInput {
    #[serde(flatten)]
    pub basics: RecipeBasics,
    pub water_temperature: f64,
    pub coffee_amount: f64,
    pub drip_type: DripType,
    /// Never empty.
    pub extraction_steps: Vec<DripStep>,
    pub dripper: Option<Equipment>,
    pub grind: Option<Grind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "brewType", rename_all = "snake_case")]
pub enum RecipeInput {
    Espresso(EspressoRecipeInput),
    Drip(DripRecipeInput),
}

impl RecipeInput {
    pub fn brew_type(&self) -> BrewType {
        match self {
            RecipeInput::Espresso(_) => BrewType::Espresso,
            RecipeInput::Drip(_) => BrewType::Drip,
        }
    }

    pub fn basics(&self) -> &RecipeBasics {
        match self {
            RecipeInput::Espresso(input) => &input.basics,
            RecipeInput::Drip(input) => &input.basics,
        }
    }

    /// The parameter payload this submission replaces on the recipe.
    pub fn params(&self) -> RecipeParams {
        match self {
            RecipeInput::Espresso(input) => RecipeParams::Espresso(EspressoParams::from(input)),
            RecipeInput::Drip(input) => RecipeParams::Drip(DripParams::from(input)),
        }
    }
}

impl From<&EspressoRecipeInput> for EspressoParams {
    fn from(input: &EspressoRecipeInput) -> Self {
        EspressoParams {
            water_temperature: input.water_temperature,
            coffee_amount: input.coffee_amount,
            extraction_time: Some(input.extraction_time),
            extraction_amount: Some(input.extraction_amount),
            grind: input.grind.clone(),
        }
    }
}

impl From<&DripRecipeInput> for DripParams {
    fn from(input: &DripRecipeInput) -> Self {
        DripParams {
            water_temperature: input.water_temperature,
            coffee_amount: input.coffee_amount,
            drip_type: Some(input.drip_type),
            extraction_steps: input.extraction_steps.clone(),
            dripper: input.dripper.clone(),
            grind: input.grind.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewInput {
    pub rating: Rating,
    pub content: Option<String>,
}
