//! Ordering and filtering for recipe lists.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{BrewType, Recipe};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeSort {
    #[default]
    Newest,
    MostLiked,
    MostReviewed,
}

impl RecipeSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeSort::Newest => "newest",
            RecipeSort::MostLiked => "most_liked",
            RecipeSort::MostReviewed => "most_reviewed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(RecipeSort::Newest),
            "most_liked" => Some(RecipeSort::MostLiked),
            "most_reviewed" => Some(RecipeSort::MostReviewed),
            _ => None,
        }
    }
}

/// Sort in place. Ties fall back to newest first, then id, so the order is
/// stable across calls.
pub fn sort_recipes(recipes: &mut [Recipe], sort: RecipeSort) {
    recipes.sort_by(|a, b| {
        let primary = match sort {
            RecipeSort::Newest => Ordering::Equal,
            RecipeSort::MostLiked => b.likes_count.cmp(&a.likes_count),
            RecipeSort::MostReviewed => b.reviews_count.cmp(&a.reviews_count),
        };
        primary
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub fn filter_by_brew_type(
    recipes: &[Recipe],
    brew_type: BrewType,
) -> impl Iterator<Item = &Recipe> {
    recipes.iter().filter(move |r| r.brew_type() == brew_type)
}
