use super::fields::{self, EXTRACTION_AMOUNT, EXTRACTION_TIME};
use super::{COFFEE_AMOUNT, EXTRACTION, WATER_TEMPERATURE};
use crate::error::FieldErrors;
use crate::form::FormData;
use crate::input::EspressoRecipeInput;

/// Validate an espresso recipe submission.
///
/// Extraction time and extraction amount each accept either a single value or
/// a `...Min`/`...Max` pair, independently of one another. Picking a grinder
/// requires a setting (and a name, for "other"); otherwise a free-text
/// `grindSize` may be given.
pub fn validate_espresso(form: &FormData) -> Result<EspressoRecipeInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let basics = fields::basics(form, &mut errors);
    let water_temperature =
        fields::required_number(form, &mut errors, "waterTemperature", WATER_TEMPERATURE);
    let coffee_amount = fields::required_number(form, &mut errors, "coffeeAmount", COFFEE_AMOUNT);
    let extraction_time = fields::measure(form, &mut errors, &EXTRACTION_TIME, EXTRACTION);
    let extraction_amount = fields::measure(form, &mut errors, &EXTRACTION_AMOUNT, EXTRACTION);
    let grind = fields::grind(form, &mut errors);

    tracing::debug!(
        brew_type = "espresso",
        invalid_fields = errors.len(),
        "Validated recipe submission"
    );

    match (
        basics,
        water_temperature,
        coffee_amount,
        extraction_time,
        extraction_amount,
    ) {
        (
            Some(basics),
            Some(water_temperature),
            Some(coffee_amount),
            Some(extraction_time),
            Some(extraction_amount),
        ) if errors.is_empty() => Ok(EspressoRecipeInput {
            basics,
            water_temperature,
            coffee_amount,
            extraction_time,
            extraction_amount,
            grind,
        }),
        _ => Err(errors),
    }
}
