pub mod details;
pub mod error;
pub mod form;
pub mod input;
pub mod listing;
pub mod projection;
pub mod stats;
pub mod types;
pub mod validate;

pub use error::{FieldErrorKind, FieldErrors, ReviewError};
pub use form::{FormData, FormValue};
pub use input::{DripRecipeInput, EspressoRecipeInput, RecipeBasics, RecipeInput, ReviewInput};
pub use listing::{filter_by_brew_type, sort_recipes, RecipeSort};
pub use projection::{
    prepare_recipe_row, project_recipe, project_review, NewRecipeRow, RecipeRow, ReviewRow,
};
pub use stats::{calculate_average_rating, compute_review_stats, Rated, ReviewStats};
pub use types::{
    BrewType, DripParams, DripStep, DripType, Equipment, EspressoParams, Grind, Measure, Rating,
    Recipe, RecipeParams, Review,
};
pub use validate::{validate_drip, validate_espresso, validate_recipe, validate_review};
