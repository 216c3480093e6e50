use super::fields;
use super::{COFFEE_AMOUNT, WATER_TEMPERATURE};
use crate::error::{FieldErrorKind, FieldErrors};
use crate::form::FormData;
use crate::input::DripRecipeInput;
use crate::types::DripType;

/// Validate a drip (pour-over) recipe submission.
///
/// `extractionSteps` must already be decoded into a list of
/// `{stepName, waterAmount, duration?}` objects; its order is the pour order.
pub fn validate_drip(form: &FormData) -> Result<DripRecipeInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let basics = fields::basics(form, &mut errors);
    let water_temperature =
        fields::required_number(form, &mut errors, "waterTemperature", WATER_TEMPERATURE);
    let coffee_amount = fields::required_number(form, &mut errors, "coffeeAmount", COFFEE_AMOUNT);
    let drip_type = drip_type(form, &mut errors);
    let extraction_steps = fields::steps(form, &mut errors);
    let dripper = fields::dripper(form, &mut errors);
    let grind = fields::grind(form, &mut errors);

    tracing::debug!(
        brew_type = "drip",
        invalid_fields = errors.len(),
        "Validated recipe submission"
    );

    match (
        basics,
        water_temperature,
        coffee_amount,
        drip_type,
        extraction_steps,
    ) {
        (
            Some(basics),
            Some(water_temperature),
            Some(coffee_amount),
            Some(drip_type),
            Some(extraction_steps),
        ) if errors.is_empty() => Ok(DripRecipeInput {
            basics,
            water_temperature,
            coffee_amount,
            drip_type,
            extraction_steps,
            dripper,
            grind,
        }),
        _ => Err(errors),
    }
}

fn drip_type(form: &FormData, errors: &mut FieldErrors) -> Option<DripType> {
    let value = match form.text("dripType") {
        Ok(Some(value)) => value,
        Ok(None) => {
            errors.push("dripType", FieldErrorKind::RequiredFieldMissing);
            return None;
        }
        Err(kind) => {
            errors.push("dripType", kind);
            return None;
        }
    };
    let drip_type = DripType::from_str(&value);
    if drip_type.is_none() {
        errors.push(
            "dripType",
            FieldErrorKind::InvalidChoice {
                allowed: DripType::NAMES,
            },
        );
    }
    drip_type
}
