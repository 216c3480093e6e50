//! Review aggregates shown on a recipe page.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::input::ReviewInput;
use crate::types::{Rating, Review};

/// Anything that carries a star rating.
pub trait Rated {
    fn rating(&self) -> Rating;
}

impl Rated for Rating {
    fn rating(&self) -> Rating {
        *self
    }
}

impl Rated for Review {
    fn rating(&self) -> Rating {
        self.rating
    }
}

impl Rated for ReviewInput {
    fn rating(&self) -> Rating {
        self.rating
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Mean rating to one decimal place, 0 when there are no reviews.
    pub average_rating: f64,
    pub total_reviews: usize,
    /// Count per star value; always has all five keys.
    pub rating_distribution: BTreeMap<u8, usize>,
}

pub fn compute_review_stats<R: Rated>(reviews: &[R]) -> ReviewStats {
    let mut rating_distribution: BTreeMap<u8, usize> =
        (Rating::MIN..=Rating::MAX).map(|star| (star, 0)).collect();
    for review in reviews {
        *rating_distribution
            .entry(review.rating().get())
            .or_default() += 1;
    }

    ReviewStats {
        average_rating: calculate_average_rating(reviews),
        total_reviews: reviews.len(),
        rating_distribution,
    }
}

/// Mean rating rounded half away from zero to one decimal place.
pub fn calculate_average_rating<R: Rated>(reviews: &[R]) -> f64 {
    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating().get())).sum();
    rounded_tenths(sum, reviews.len() as u64)
}

/// `sum / count` to one decimal, in integer tenths. 4.25 rounds to 4.3.
fn rounded_tenths(sum: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let tenths = (sum * 20 + count) / (count * 2);
    tenths as f64 / 10.0
}
