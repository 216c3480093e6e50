//! Checks shared by the recipe schemas.
//!
//! Each check reads the form, records what it finds wrong in the shared
//! [`FieldErrors`], and returns the parsed value only when it is usable.
//! None of them stop at the first problem.

use serde_json::Value;

use super::{Bounds, TITLE_MAX_CHARS};
use crate::error::{FieldErrorKind, FieldErrors};
use crate::form::{coerce_number, FormData, FormValue};
use crate::input::RecipeBasics;
use crate::types::{DripStep, Equipment, Grind, Measure, OTHER};

/// Field names for a metric that may be a single value or a min/max range.
pub(super) struct MeasureFields {
    pub single: &'static str,
    pub min: &'static str,
    pub max: &'static str,
    pub missing: FieldErrorKind,
}

pub(super) const EXTRACTION_TIME: MeasureFields = MeasureFields {
    single: "extractionTime",
    min: "extractionTimeMin",
    max: "extractionTimeMax",
    missing: FieldErrorKind::MissingExtractionTime,
};

pub(super) const EXTRACTION_AMOUNT: MeasureFields = MeasureFields {
    single: "extractionAmount",
    min: "extractionAmountMin",
    max: "extractionAmountMax",
    missing: FieldErrorKind::MissingExtractionAmount,
};

/// Field names for an equipment picker with an "other" escape hatch.
pub(super) struct EquipmentFields {
    pub selection: &'static str,
    pub custom: &'static str,
    pub missing: FieldErrorKind,
}

pub(super) const GRINDER: EquipmentFields = EquipmentFields {
    selection: "grinder",
    custom: "otherGrinder",
    missing: FieldErrorKind::MissingCustomGrinderName,
};

pub(super) const DRIPPER: EquipmentFields = EquipmentFields {
    selection: "dripper",
    custom: "otherDripper",
    missing: FieldErrorKind::MissingCustomDripperName,
};

pub(super) const STEPS: &str = "extractionSteps";

pub(super) fn basics(form: &FormData, errors: &mut FieldErrors) -> Option<RecipeBasics> {
    let description = text(form, errors, "description");
    let bean = text(form, errors, "bean");
    let tips = text(form, errors, "tips");
    let title = title(form, errors)?;
    Some(RecipeBasics {
        title,
        description,
        bean,
        tips,
    })
}

/// Trimmed text of an optional field. A value that is not text is reported
/// and treated as absent.
pub(super) fn text(
    form: &FormData,
    errors: &mut FieldErrors,
    field: &'static str,
) -> Option<String> {
    form.text(field).unwrap_or_else(|kind| {
        errors.push(field, kind);
        None
    })
}

fn title(form: &FormData, errors: &mut FieldErrors) -> Option<String> {
    match form.text("title") {
        Ok(None) => {
            errors.push("title", FieldErrorKind::RequiredFieldMissing);
            None
        }
        Err(kind) => {
            errors.push("title", kind);
            None
        }
        Ok(Some(title)) if title.chars().count() > TITLE_MAX_CHARS => {
            errors.push(
                "title",
                FieldErrorKind::TooLong {
                    max: TITLE_MAX_CHARS,
                },
            );
            None
        }
        Ok(Some(title)) => Some(title),
    }
}

pub(super) fn required_number(
    form: &FormData,
    errors: &mut FieldErrors,
    field: &'static str,
    bounds: Bounds,
) -> Option<f64> {
    match form.number(field) {
        Ok(Some(value)) => within(errors, field, value, bounds),
        Ok(None) => {
            errors.push(field, FieldErrorKind::RequiredFieldMissing);
            None
        }
        Err(kind) => {
            errors.push(field, kind);
            None
        }
    }
}

fn optional_number(
    form: &FormData,
    errors: &mut FieldErrors,
    field: &'static str,
    bounds: Bounds,
) -> Option<f64> {
    match form.number(field) {
        Ok(Some(value)) => within(errors, field, value, bounds),
        Ok(None) => None,
        Err(kind) => {
            errors.push(field, kind);
            None
        }
    }
}

fn within(
    errors: &mut FieldErrors,
    field: &'static str,
    value: f64,
    bounds: Bounds,
) -> Option<f64> {
    if bounds.contains(value) {
        Some(value)
    } else {
        errors.push(
            field,
            FieldErrorKind::OutOfRange {
                min: bounds.min,
                max: bounds.max,
            },
        );
        None
    }
}

/// Resolve a single-value-or-range metric.
///
/// Every field that was filled in is checked against `bounds` and reported
/// under its own name. An inverted range is reported on the min field. A
/// single value takes precedence over a range when both are given.
pub(super) fn measure(
    form: &FormData,
    errors: &mut FieldErrors,
    fields: &MeasureFields,
    bounds: Bounds,
) -> Option<Measure> {
    let single = optional_number(form, errors, fields.single, bounds);
    let min = optional_number(form, errors, fields.min, bounds);
    let max = optional_number(form, errors, fields.max, bounds);

    if let (Some(min), Some(max)) = (min, max) {
        if min >= max {
            errors.push(fields.min, FieldErrorKind::InvalidRange);
        }
    }

    let single_given = form.is_present(fields.single);
    let range_given = form.is_present(fields.min) && form.is_present(fields.max);
    if !single_given && !range_given {
        errors.push(fields.single, fields.missing.clone());
        return None;
    }

    match (single_given, single, min, max) {
        (true, Some(value), _, _) => Some(Measure::Exact(value)),
        (false, _, Some(min), Some(max)) if min < max => Some(Measure::Range { min, max }),
        _ => None,
    }
}

/// Grinder picker, or free-text grind size when no grinder is chosen.
pub(super) fn grind(form: &FormData, errors: &mut FieldErrors) -> Option<Grind> {
    let Some(selection) = text(form, errors, GRINDER.selection) else {
        return text(form, errors, "grindSize").map(|size| Grind::Size { size });
    };

    let setting = text(form, errors, "grinderSetting");
    if setting.is_none() {
        errors.push("grinderSetting", FieldErrorKind::MissingGrinderSetting);
    }
    let grinder = equipment(form, errors, &GRINDER, selection);

    Some(Grind::Grinder {
        grinder: grinder?,
        setting: setting?,
    })
}

pub(super) fn dripper(form: &FormData, errors: &mut FieldErrors) -> Option<Equipment> {
    let selection = text(form, errors, DRIPPER.selection)?;
    equipment(form, errors, &DRIPPER, selection)
}

fn equipment(
    form: &FormData,
    errors: &mut FieldErrors,
    fields: &EquipmentFields,
    selection: String,
) -> Option<Equipment> {
    if selection != OTHER {
        return Some(Equipment::Named(selection));
    }
    match text(form, errors, fields.custom) {
        Some(name) => Some(Equipment::Custom(name)),
        None => {
            errors.push(fields.custom, fields.missing.clone());
            None
        }
    }
}

/// The ordered pour sequence. Per-step problems are reported as
/// `extractionSteps[<index>].<key>`.
pub(super) fn steps(form: &FormData, errors: &mut FieldErrors) -> Option<Vec<DripStep>> {
    let entries = match form.get(STEPS) {
        Some(FormValue::List(entries)) if !entries.is_empty() => entries,
        Some(FormValue::Text(text)) if !text.trim().is_empty() => {
            errors.push(STEPS, FieldErrorKind::InvalidFormat);
            return None;
        }
        Some(FormValue::Number(_) | FormValue::Bool(_) | FormValue::Object(_)) => {
            errors.push(STEPS, FieldErrorKind::InvalidFormat);
            return None;
        }
        _ => {
            errors.push(STEPS, FieldErrorKind::RequiredFieldMissing);
            return None;
        }
    };

    let mut steps = Vec::with_capacity(entries.len());
    let mut all_valid = true;
    for (index, entry) in entries.iter().enumerate() {
        match step(errors, index, entry) {
            Some(step) => steps.push(step),
            None => all_valid = false,
        }
    }
    all_valid.then_some(steps)
}

fn step(errors: &mut FieldErrors, index: usize, entry: &Value) -> Option<DripStep> {
    let Some(object) = entry.as_object() else {
        errors.push(format!("{STEPS}[{index}]"), FieldErrorKind::InvalidFormat);
        return None;
    };
    let field = |key: &str| format!("{STEPS}[{index}].{key}");

    let step_name = object
        .get("stepName")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    if step_name.is_none() {
        errors.push(field("stepName"), FieldErrorKind::RequiredFieldMissing);
    }

    let water_amount = match object.get("waterAmount").map(coerce_number) {
        Some(Ok(Some(amount))) => positive(errors, field("waterAmount"), amount),
        None | Some(Ok(None)) => {
            errors.push(field("waterAmount"), FieldErrorKind::RequiredFieldMissing);
            None
        }
        Some(Err(kind)) => {
            errors.push(field("waterAmount"), kind);
            None
        }
    };

    let duration = match object.get("duration").map(coerce_number) {
        Some(Ok(Some(duration))) => Some(positive(errors, field("duration"), duration)?),
        None | Some(Ok(None)) => None,
        Some(Err(kind)) => {
            errors.push(field("duration"), kind);
            return None;
        }
    };

    Some(DripStep {
        step_name: step_name?,
        water_amount: water_amount?,
        duration,
    })
}

fn positive(errors: &mut FieldErrors, field: String, value: f64) -> Option<f64> {
    if value > 0.0 {
        Some(value)
    } else {
        errors.push(field, FieldErrorKind::NotPositive);
        None
    }
}
