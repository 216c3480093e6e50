use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ReviewError;

/// Reserved selection value meaning "not in the list, see the free-text field".
pub const OTHER: &str = "other";

/// Which parameter payload a recipe carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrewType {
    Espresso,
    Drip,
}

impl BrewType {
    pub const ALL: &'static [BrewType] = &[BrewType::Espresso, BrewType::Drip];

    pub fn as_str(&self) -> &'static str {
        match self {
            BrewType::Espresso => "espresso",
            BrewType::Drip => "drip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "espresso" => Some(BrewType::Espresso),
            "drip" => Some(BrewType::Drip),
            _ => None,
        }
    }
}

/// A target value, or a tolerance window around one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Exact(f64),
    Range { min: f64, max: f64 },
}

/// A grinder or dripper: one of the listed models, or a user-supplied name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Equipment {
    /// A listed model. Never the `"other"` sentinel.
    Named(String),
    Custom(String),
    /// A stored `"other"` selection that came without its custom name. Only
    /// produced when reading rows that bypassed validation.
    UnnamedOther,
}

impl Equipment {
    /// Display name of the equipment.
    pub fn name(&self) -> &str {
        match self {
            Equipment::Named(name) | Equipment::Custom(name) => name,
            Equipment::UnnamedOther => OTHER,
        }
    }

    /// Selection value plus accompanying free-text name, as stored.
    pub fn to_stored(&self) -> (&str, Option<&str>) {
        match self {
            Equipment::Named(name) => (name, None),
            Equipment::Custom(name) => (OTHER, Some(name)),
            Equipment::UnnamedOther => (OTHER, None),
        }
    }
}

/// How the grind is described: free text, or a grinder and its setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Grind {
    Size { size: String },
    Grinder { grinder: Equipment, setting: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DripType {
    Hot,
    Ice,
}

impl DripType {
    pub const NAMES: &'static [&'static str] = &["hot", "ice"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DripType::Hot => "hot",
            DripType::Ice => "ice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hot" => Some(DripType::Hot),
            "ice" => Some(DripType::Ice),
            _ => None,
        }
    }
}

/// One pour in a drip recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DripStep {
    pub step_name: String,
    /// Grams of water poured in this step.
    pub water_amount: f64,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EspressoParams {
    /// Celsius.
    pub water_temperature: f64,
    /// Grams of ground coffee.
    pub coffee_amount: f64,
    /// Seconds.
    pub extraction_time: Option<Measure>,
    /// Grams of espresso in the cup.
    pub extraction_amount: Option<Measure>,
    pub grind: Option<Grind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DripParams {
    pub water_temperature: f64,
    pub coffee_amount: f64,
    pub drip_type: Option<DripType>,
    /// Pour sequence, in order.
    pub extraction_steps: Vec<DripStep>,
    pub dripper: Option<Equipment>,
    pub grind: Option<Grind>,
}

/// The brew-type specific half of a recipe. Exactly one is ever attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecipeParams {
    #[serde(rename = "espressoParams")]
    Espresso(EspressoParams),
    #[serde(rename = "dripParams")]
    Drip(DripParams),
}

impl RecipeParams {
    pub fn brew_type(&self) -> BrewType {
        match self {
            RecipeParams::Espresso(_) => BrewType::Espresso,
            RecipeParams::Drip(_) => BrewType::Drip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub bean: Option<String>,
    pub tips: Option<String>,
    #[serde(flatten)]
    pub params: RecipeParams,
    pub likes_count: usize,
    pub reviews_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    pub fn brew_type(&self) -> BrewType {
        self.params.brew_type()
    }

    pub fn espresso_params(&self) -> Option<&EspressoParams> {
        match &self.params {
            RecipeParams::Espresso(params) => Some(params),
            RecipeParams::Drip(_) => None,
        }
    }

    pub fn drip_params(&self) -> Option<&DripParams> {
        match &self.params {
            RecipeParams::Drip(params) => Some(params),
            RecipeParams::Espresso(_) => None,
        }
    }
}

/// A star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ReviewError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Rating::MIN)..=i64::from(Rating::MAX)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(ReviewError::RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: Uuid,
    pub rating: Rating,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rating_bounds() {
        assert_eq!(Rating::try_from(1_i64).map(Rating::get), Ok(1));
        assert_eq!(Rating::try_from(5_i64).map(Rating::get), Ok(5));
        assert_eq!(
            Rating::try_from(0_i64),
            Err(ReviewError::RatingOutOfRange(0))
        );
        assert_eq!(
            Rating::try_from(6_i64),
            Err(ReviewError::RatingOutOfRange(6))
        );
    }

    #[test]
    fn test_rating_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_value::<Rating>(json!(4)).is_ok());
        assert!(serde_json::from_value::<Rating>(json!(9)).is_err());
    }

    #[test]
    fn test_custom_equipment_stores_behind_sentinel() {
        let custom = Equipment::Custom("Kinu M47".to_string());
        assert_eq!(custom.to_stored(), ("other", Some("Kinu M47")));
        assert_eq!(custom.name(), "Kinu M47");

        let named = Equipment::Named("comandante".to_string());
        assert_eq!(named.to_stored(), ("comandante", None));

        assert_eq!(Equipment::UnnamedOther.to_stored(), ("other", None));
        assert_eq!(
            serde_json::to_value(&Equipment::UnnamedOther).unwrap(),
            json!({ "kind": "unnamed_other" })
        );
    }

    #[test]
    fn test_params_serialize_under_their_own_key() {
        let params = RecipeParams::Drip(DripParams {
            water_temperature: 93.0,
            coffee_amount: 20.0,
            drip_type: Some(DripType::Hot),
            extraction_steps: vec![],
            dripper: None,
            grind: None,
        });
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("dripParams").is_some());
        assert!(value.get("espressoParams").is_none());
    }

    #[test]
    fn test_brew_type_names() {
        for brew_type in BrewType::ALL {
            assert_eq!(BrewType::from_str(brew_type.as_str()), Some(*brew_type));
        }
        assert_eq!(BrewType::from_str("siphon"), None);
    }
}
