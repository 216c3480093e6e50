//! The `recipe_details` JSON column.
//!
//! Both brew types share one flat blob. Writing only ever emits the keys of
//! the recipe's own brew type; reading is lenient because rows may have been
//! written by older clients or edited by hand, and never fails.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::form::coerce_number;
use crate::types::{
    DripParams, DripStep, DripType, Equipment, EspressoParams, Grind, Measure, RecipeParams, OTHER,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coffee_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_time_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_time_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_amount_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_amount_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grinder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_grinder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grinder_setting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grind_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drip_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_steps: Option<Vec<DripStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dripper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_dripper: Option<String>,
}

impl RecipeDetails {
    /// Decode a stored blob. Anything unreadable is treated as absent.
    ///
    /// Accepts the blob as an object, or as a string holding encoded JSON.
    pub fn from_stored(value: &Value) -> Self {
        let decoded;
        let object = match value {
            Value::Object(object) => object,
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(object)) => {
                    decoded = object;
                    &decoded
                }
                _ => {
                    tracing::warn!("recipe_details string is not a JSON object, ignoring it");
                    return Self::default();
                }
            },
            Value::Null => return Self::default(),
            other => {
                tracing::warn!(
                    kind = json_kind(other),
                    "recipe_details is not an object, ignoring it"
                );
                return Self::default();
            }
        };

        let number = |key: &str| object.get(key).and_then(|v| coerce_number(v).ok().flatten());
        let text = |key: &str| stored_text(object, key);

        RecipeDetails {
            water_temperature: number("waterTemperature"),
            coffee_amount: number("coffeeAmount"),
            extraction_time: number("extractionTime"),
            extraction_time_min: number("extractionTimeMin"),
            extraction_time_max: number("extractionTimeMax"),
            extraction_amount: number("extractionAmount"),
            extraction_amount_min: number("extractionAmountMin"),
            extraction_amount_max: number("extractionAmountMax"),
            grinder: text("grinder"),
            other_grinder: text("otherGrinder"),
            grinder_setting: text("grinderSetting"),
            grind_size: text("grindSize"),
            drip_type: text("dripType"),
            extraction_steps: object.get("extractionSteps").map(stored_steps),
            dripper: text("dripper"),
            other_dripper: text("otherDripper"),
        }
    }

    pub fn from_params(params: &RecipeParams) -> Self {
        match params {
            RecipeParams::Espresso(params) => Self::from_espresso(params),
            RecipeParams::Drip(params) => Self::from_drip(params),
        }
    }

    fn from_espresso(params: &EspressoParams) -> Self {
        let (extraction_time, extraction_time_min, extraction_time_max) =
            split_measure(params.extraction_time);
        let (extraction_amount, extraction_amount_min, extraction_amount_max) =
            split_measure(params.extraction_amount);
        let mut details = RecipeDetails {
            water_temperature: Some(params.water_temperature),
            coffee_amount: Some(params.coffee_amount),
            extraction_time,
            extraction_time_min,
            extraction_time_max,
            extraction_amount,
            extraction_amount_min,
            extraction_amount_max,
            ..Default::default()
        };
        details.set_grind(params.grind.as_ref());
        details
    }

    fn from_drip(params: &DripParams) -> Self {
        let (dripper, other_dripper) = split_equipment(params.dripper.as_ref());
        let mut details = RecipeDetails {
            water_temperature: Some(params.water_temperature),
            coffee_amount: Some(params.coffee_amount),
            drip_type: params.drip_type.map(|t| t.as_str().to_string()),
            extraction_steps: Some(params.extraction_steps.clone()),
            dripper,
            other_dripper,
            ..Default::default()
        };
        details.set_grind(params.grind.as_ref());
        details
    }

    fn set_grind(&mut self, grind: Option<&Grind>) {
        match grind {
            Some(Grind::Size { size }) => self.grind_size = Some(size.clone()),
            Some(Grind::Grinder { grinder, setting }) => {
                let (selection, custom) = split_equipment(Some(grinder));
                self.grinder = selection;
                self.other_grinder = custom;
                self.grinder_setting = Some(setting.clone());
            }
            None => {}
        }
    }

    pub fn espresso_params(&self) -> EspressoParams {
        EspressoParams {
            water_temperature: or_zero("waterTemperature", self.water_temperature),
            coffee_amount: or_zero("coffeeAmount", self.coffee_amount),
            extraction_time: join_measure(
                self.extraction_time,
                self.extraction_time_min,
                self.extraction_time_max,
            ),
            extraction_amount: join_measure(
                self.extraction_amount,
                self.extraction_amount_min,
                self.extraction_amount_max,
            ),
            grind: self.grind(),
        }
    }

    pub fn drip_params(&self) -> DripParams {
        let drip_type = self.drip_type.as_deref().and_then(|value| {
            let parsed = DripType::from_str(value);
            if parsed.is_none() {
                tracing::warn!(drip_type = value, "Unknown stored drip type, dropping it");
            }
            parsed
        });

        DripParams {
            water_temperature: or_zero("waterTemperature", self.water_temperature),
            coffee_amount: or_zero("coffeeAmount", self.coffee_amount),
            drip_type,
            extraction_steps: self.extraction_steps.clone().unwrap_or_default(),
            dripper: join_equipment(
                "dripper",
                self.dripper.as_deref(),
                self.other_dripper.as_deref(),
            ),
            grind: self.grind(),
        }
    }

    fn grind(&self) -> Option<Grind> {
        let Some(grinder) = join_equipment(
            "grinder",
            self.grinder.as_deref(),
            self.other_grinder.as_deref(),
        ) else {
            return self
                .grind_size
                .clone()
                .map(|size| Grind::Size { size });
        };
        let setting = self.grinder_setting.clone().unwrap_or_else(|| {
            tracing::warn!(grinder = grinder.name(), "Stored grinder has no setting");
            String::new()
        });
        Some(Grind::Grinder { grinder, setting })
    }
}

fn or_zero(key: &'static str, value: Option<f64>) -> f64 {
    value.unwrap_or_else(|| {
        tracing::warn!(key, "Stored recipe is missing a number, using 0");
        0.0
    })
}

fn split_measure(measure: Option<Measure>) -> (Option<f64>, Option<f64>, Option<f64>) {
    match measure {
        Some(Measure::Exact(value)) => (Some(value), None, None),
        Some(Measure::Range { min, max }) => (None, Some(min), Some(max)),
        None => (None, None, None),
    }
}

/// A stored single value wins; otherwise both bounds are needed. Stored
/// ranges are taken as written, even if inverted.
fn join_measure(single: Option<f64>, min: Option<f64>, max: Option<f64>) -> Option<Measure> {
    match (single, min, max) {
        (Some(value), _, _) => Some(Measure::Exact(value)),
        (None, Some(min), Some(max)) => Some(Measure::Range { min, max }),
        _ => None,
    }
}

fn split_equipment(equipment: Option<&Equipment>) -> (Option<String>, Option<String>) {
    match equipment.map(Equipment::to_stored) {
        Some((selection, custom)) => (Some(selection.to_string()), custom.map(str::to_string)),
        None => (None, None),
    }
}

fn join_equipment(
    kind: &'static str,
    selection: Option<&str>,
    custom: Option<&str>,
) -> Option<Equipment> {
    let selection = selection?;
    if selection != OTHER {
        return Some(Equipment::Named(selection.to_string()));
    }
    match custom {
        Some(name) => Some(Equipment::Custom(name.to_string())),
        None => {
            // Rows written around the form can carry the bare sentinel. Keep
            // what was stored rather than guessing a name.
            tracing::warn!(kind, "Stored \"other\" selection has no custom name");
            Some(Equipment::UnnamedOther)
        }
    }
}

fn stored_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn stored_steps(value: &Value) -> Vec<DripStep> {
    let Some(entries) = value.as_array() else {
        tracing::warn!(
            kind = json_kind(value),
            "extractionSteps is not an array, ignoring it"
        );
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let Some(object) = entry.as_object() else {
                tracing::warn!(kind = json_kind(entry), "Skipping malformed stored step");
                return None;
            };
            let number =
                |key: &str| object.get(key).and_then(|v| coerce_number(v).ok().flatten());
            Some(DripStep {
                step_name: stored_text(object, "stepName").unwrap_or_default(),
                water_amount: number("waterAmount").unwrap_or_default(),
                duration: number("duration"),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn espresso() -> EspressoParams {
        EspressoParams {
            water_temperature: 93.0,
            coffee_amount: 18.0,
            extraction_time: Some(Measure::Range {
                min: 25.0,
                max: 30.0,
            }),
            extraction_amount: Some(Measure::Exact(36.0)),
            grind: Some(Grind::Grinder {
                grinder: Equipment::Custom("Kinu M47".to_string()),
                setting: "2.3".to_string(),
            }),
        }
    }

    #[test]
    fn test_espresso_blob_layout() {
        let details = RecipeDetails::from_params(&RecipeParams::Espresso(espresso()));
        assert_eq!(
            serde_json::to_value(&details).unwrap(),
            json!({
                "waterTemperature": 93.0,
                "coffeeAmount": 18.0,
                "extractionTimeMin": 25.0,
                "extractionTimeMax": 30.0,
                "extractionAmount": 36.0,
                "grinder": "other",
                "otherGrinder": "Kinu M47",
                "grinderSetting": "2.3"
            })
        );
    }

    #[test]
    fn test_written_blob_reads_back() {
        let details = RecipeDetails::from_params(&RecipeParams::Espresso(espresso()));
        let stored = serde_json::to_value(&details).unwrap();
        assert_eq!(RecipeDetails::from_stored(&stored).espresso_params(), espresso());
    }

    #[test]
    fn test_lenient_numbers_and_strings() {
        let details = RecipeDetails::from_stored(&json!({
            "waterTemperature": "92",
            "coffeeAmount": 15,
            "extractionTime": "not a number",
            "grindSize": "  medium-fine ",
            "bogus": true
        }));
        assert_eq!(details.water_temperature, Some(92.0));
        assert_eq!(details.coffee_amount, Some(15.0));
        assert_eq!(details.extraction_time, None);
        assert_eq!(details.grind_size.as_deref(), Some("medium-fine"));
    }

    #[test]
    fn test_double_encoded_blob() {
        let stored = json!(r#"{"waterTemperature": 90, "dripType": "ice"}"#);
        let params = RecipeDetails::from_stored(&stored).drip_params();
        assert_eq!(params.water_temperature, 90.0);
        assert_eq!(params.drip_type, Some(DripType::Ice));
    }

    #[test]
    fn test_unreadable_blob_is_empty() {
        for stored in [json!(null), json!(42), json!([1, 2]), json!("not json")] {
            assert_eq!(RecipeDetails::from_stored(&stored), RecipeDetails::default());
        }
    }

    #[test]
    fn test_bare_other_sentinel_is_kept() {
        let params = RecipeDetails::from_stored(&json!({ "dripper": "other" })).drip_params();
        assert_eq!(params.dripper, Some(Equipment::UnnamedOther));

        let details = RecipeDetails::from_params(&RecipeParams::Drip(params));
        assert_eq!(details.dripper.as_deref(), Some("other"));
        assert_eq!(details.other_dripper, None);
    }

    #[test]
    fn test_malformed_steps_are_skipped_in_order() {
        let details = RecipeDetails::from_stored(&json!({
            "extractionSteps": [
                { "stepName": "Bloom", "waterAmount": 40, "duration": 30 },
                "junk",
                { "stepName": "Finish", "waterAmount": "120" }
            ]
        }));
        let names: Vec<_> = details
            .extraction_steps
            .unwrap()
            .into_iter()
            .map(|s| (s.step_name, s.water_amount))
            .collect();
        assert_eq!(
            names,
            vec![("Bloom".to_string(), 40.0), ("Finish".to_string(), 120.0)]
        );
    }
}
