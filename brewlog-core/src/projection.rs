//! Translation between stored rows and the domain [`Recipe`] / [`Review`].
//!
//! Nothing here touches the store. Query code fetches rows and hands them to
//! [`project_recipe`]; mutation code turns validated input into a
//! [`NewRecipeRow`] with [`prepare_recipe_row`] and writes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::details::RecipeDetails;
use crate::error::ReviewError;
use crate::input::RecipeInput;
use crate::types::{BrewType, Rating, Recipe, RecipeParams, Review};

/// A `recipes` row as returned by the store, optionally with related
/// `likes` / `reviews` collections embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub brew_type: BrewType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bean: Option<String>,
    #[serde(default)]
    pub tips: Option<String>,
    #[serde(default)]
    pub recipe_details: Value,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: Option<Value>,
    #[serde(default)]
    pub reviews: Option<Value>,
}

/// Column values for inserting, or fully replacing, a recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecipeRow {
    pub user_id: Uuid,
    pub brew_type: BrewType,
    pub title: String,
    pub description: Option<String>,
    pub bean: Option<String>,
    pub tips: Option<String>,
    pub recipe_details: RecipeDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRow {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: Uuid,
    pub rating: i64,
    #[serde(default)]
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Build the domain recipe from a stored row.
///
/// Only the payload named by `brew_type` is read from `recipe_details`, no
/// matter what other keys the blob holds. Blank text becomes `None`, and
/// counts come from the embedded collections (0 when absent or not arrays).
pub fn project_recipe(row: &RecipeRow) -> Recipe {
    let details = RecipeDetails::from_stored(&row.recipe_details);
    let params = match row.brew_type {
        BrewType::Espresso => RecipeParams::Espresso(details.espresso_params()),
        BrewType::Drip => RecipeParams::Drip(details.drip_params()),
    };

    Recipe {
        id: row.id,
        user_id: row.user_id,
        title: row.title.clone(),
        description: present(row.description.as_deref()),
        bean: present(row.bean.as_deref()),
        tips: present(row.tips.as_deref()),
        params,
        likes_count: collection_len(row.id, "likes", row.likes.as_ref()),
        reviews_count: collection_len(row.id, "reviews", row.reviews.as_ref()),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Render a validated submission as the row to write for `user_id`.
///
/// Edits go through here too; the result replaces every column, including
/// the whole `recipe_details` payload.
pub fn prepare_recipe_row(user_id: Uuid, input: &RecipeInput) -> NewRecipeRow {
    let basics = input.basics();
    NewRecipeRow {
        user_id,
        brew_type: input.brew_type(),
        title: basics.title.clone(),
        description: basics.description.clone(),
        bean: basics.bean.clone(),
        tips: basics.tips.clone(),
        recipe_details: RecipeDetails::from_params(&input.params()),
    }
}

/// Build a domain review, rejecting ratings outside 1..=5.
pub fn project_review(row: ReviewRow) -> Result<Review, ReviewError> {
    Ok(Review {
        id: row.id,
        recipe_id: row.recipe_id,
        user_id: row.user_id,
        rating: Rating::try_from(row.rating)?,
        content: present(row.content.as_deref()),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn present(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty()).map(str::to_string)
}

fn collection_len(recipe_id: Uuid, name: &'static str, collection: Option<&Value>) -> usize {
    match collection {
        Some(Value::Array(items)) => items.len(),
        None | Some(Value::Null) => 0,
        Some(_) => {
            tracing::warn!(%recipe_id, collection = name, "Related collection is not an array");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DripType, Measure};
    use chrono::TimeZone;
    use serde_json::json;

    fn row(brew_type: BrewType, details: Value) -> RecipeRow {
        RecipeRow {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            brew_type,
            title: "Row".to_string(),
            description: None,
            bean: None,
            tips: None,
            recipe_details: details,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            updated_at: None,
            likes: None,
            reviews: None,
        }
    }

    #[test]
    fn test_discriminant_selects_payload() {
        let mixed = json!({
            "waterTemperature": 92,
            "coffeeAmount": 18,
            "extractionTime": 27,
            "extractionAmount": 38,
            "dripType": "hot",
            "extractionSteps": [{ "stepName": "Bloom", "waterAmount": 40 }]
        });

        let espresso = project_recipe(&row(BrewType::Espresso, mixed.clone()));
        assert_eq!(espresso.brew_type(), BrewType::Espresso);
        assert!(espresso.drip_params().is_none());
        let params = espresso.espresso_params().unwrap();
        assert_eq!(params.extraction_time, Some(Measure::Exact(27.0)));

        let drip = project_recipe(&row(BrewType::Drip, mixed));
        assert!(drip.espresso_params().is_none());
        let params = drip.drip_params().unwrap();
        assert_eq!(params.drip_type, Some(DripType::Hot));
        assert_eq!(params.extraction_steps.len(), 1);
    }

    #[test]
    fn test_drip_row_with_empty_blob_still_has_drip_params() {
        let recipe = project_recipe(&row(BrewType::Drip, Value::Null));
        let params = recipe.drip_params().unwrap();
        assert!(params.extraction_steps.is_empty());
        assert_eq!(params.water_temperature, 0.0);
        assert!(recipe.espresso_params().is_none());
    }

    #[test]
    fn test_blank_text_is_absent() {
        let mut stored = row(BrewType::Espresso, json!({}));
        stored.description = Some(String::new());
        stored.bean = Some("  ".to_string());
        stored.tips = Some("Purge the group head".to_string());

        let recipe = project_recipe(&stored);
        assert_eq!(recipe.description, None);
        assert_eq!(recipe.bean, None);
        assert_eq!(recipe.tips.as_deref(), Some("Purge the group head"));
    }

    #[test]
    fn test_counts_from_collections() {
        let mut stored = row(BrewType::Espresso, json!({}));
        stored.likes = Some(json!([{ "user_id": "a" }, { "user_id": "b" }]));
        stored.reviews = Some(json!({ "count": 3 }));

        let recipe = project_recipe(&stored);
        assert_eq!(recipe.likes_count, 2);
        assert_eq!(recipe.reviews_count, 0);

        stored.likes = Some(Value::Null);
        assert_eq!(project_recipe(&stored).likes_count, 0);
    }

    #[test]
    fn test_projection_is_repeatable() {
        let mut stored = row(
            BrewType::Drip,
            json!({ "waterTemperature": 94, "extractionSteps": [{ "stepName": "Pour", "waterAmount": 250 }] }),
        );
        stored.likes = Some(json!([{}]));
        assert_eq!(project_recipe(&stored), project_recipe(&stored));
    }

    #[test]
    fn test_review_rating_guard() {
        let review_row = |rating| ReviewRow {
            id: Uuid::nil(),
            recipe_id: Uuid::nil(),
            user_id: Uuid::nil(),
            rating,
            content: Some(" ".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap(),
            updated_at: None,
        };

        let review = project_review(review_row(4)).unwrap();
        assert_eq!(review.rating.get(), 4);
        assert_eq!(review.content, None);

        assert_eq!(
            project_review(review_row(0)),
            Err(ReviewError::RatingOutOfRange(0))
        );
    }

    #[test]
    fn test_row_deserializes_without_optional_columns() {
        let stored: RecipeRow = serde_json::from_value(json!({
            "id": "6f1c2d3e-0000-4000-8000-000000000001",
            "user_id": "6f1c2d3e-0000-4000-8000-000000000002",
            "brew_type": "espresso",
            "title": "Minimal",
            "created_at": "2024-03-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(stored.recipe_details, Value::Null);
        assert_eq!(project_recipe(&stored).likes_count, 0);
    }
}
