use foodgram_domain::validate::has_max_len;

use crate::domain::repository::{IngredientRepository, UserRepository};
use crate::domain::types::{Ingredient, NewIngredient};
use crate::error::ApiError;
use crate::usecase::user::require_active;

pub const INGREDIENT_NAME_MAX_LEN: usize = 64;
pub const MEASUREMENT_UNIT_MAX_LEN: usize = 16;

pub struct CreateIngredientInput {
    pub name: String,
    pub measurement_unit: String,
}

/// Check and lower-case an ingredient payload.
pub fn validate_ingredient(input: CreateIngredientInput) -> Result<NewIngredient, ApiError> {
    let name = input.name.trim().to_lowercase();
    if name.is_empty() || !has_max_len(&name, INGREDIENT_NAME_MAX_LEN) {
        return Err(ApiError::validation(format!(
            "name must be 1 to {INGREDIENT_NAME_MAX_LEN} characters"
        )));
    }
    let measurement_unit = input.measurement_unit.trim().to_lowercase();
    if measurement_unit.is_empty() || !has_max_len(&measurement_unit, MEASUREMENT_UNIT_MAX_LEN) {
        return Err(ApiError::validation(format!(
            "measurement_unit must be 1 to {MEASUREMENT_UNIT_MAX_LEN} characters"
        )));
    }
    Ok(NewIngredient {
        name,
        measurement_unit,
    })
}

/// Move names starting with `needle` ahead of names that merely contain it.
///
/// The partition is stable, so each group keeps the incoming (alphabetical) order.
pub fn rank_by_prefix(needle: &str, ingredients: Vec<Ingredient>) -> Vec<Ingredient> {
    let (mut prefixed, contained): (Vec<_>, Vec<_>) = ingredients
        .into_iter()
        .partition(|i| i.name.to_lowercase().starts_with(needle));
    prefixed.extend(contained);
    prefixed
}

// ── CreateIngredient ─────────────────────────────────────────────────────────

pub struct CreateIngredientUseCase<I: IngredientRepository, U: UserRepository> {
    pub ingredients: I,
    pub users: U,
}

impl<I: IngredientRepository, U: UserRepository> CreateIngredientUseCase<I, U> {
    pub async fn execute(
        &self,
        user_id: i32,
        is_staff: bool,
        input: CreateIngredientInput,
    ) -> Result<Ingredient, ApiError> {
        if !is_staff {
            return Err(ApiError::Forbidden);
        }
        let new = validate_ingredient(input)?;
        require_active(&self.users, user_id).await?;
        self.ingredients.create(&new).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<I: IngredientRepository> {
    pub ingredients: I,
}

impl<I: IngredientRepository> GetIngredientUseCase<I> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, ApiError> {
        self.ingredients
            .find_by_id(id)
            .await?
            .ok_or(ApiError::IngredientNotFound)
    }
}

// ── SearchIngredients ────────────────────────────────────────────────────────

pub struct SearchIngredientsUseCase<I: IngredientRepository> {
    pub ingredients: I,
}

impl<I: IngredientRepository> SearchIngredientsUseCase<I> {
    /// Case-insensitive search; a blank `name` lists the whole catalog.
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<Ingredient>, ApiError> {
        let needle = name
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty());
        match needle {
            Some(needle) => {
                let found = self.ingredients.search(Some(&needle)).await?;
                Ok(rank_by_prefix(&needle, found))
            }
            None => self.ingredients.search(None).await,
        }
    }
}
