#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::relation::RelationKind;

use crate::domain::types::{
    CartIngredient, Ingredient, NewIngredient, NewRecipe, NewTag, NewUser, Recipe, RecipeChanges,
    RecipeFilter, ShortRecipe, Tag, User,
};
use crate::error::ApiError;

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    /// Fails with `UserAlreadyExists` if the email or username is taken.
    async fn create(&self, user: &NewUser) -> Result<User, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, ApiError>;
    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError>;
}

/// Repository for the tag catalog.
pub trait TagRepository: Send + Sync {
    /// Fails with `TagAlreadyExists` if the name, color or slug is taken.
    async fn create(&self, tag: &NewTag) -> Result<Tag, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, ApiError>;
    async fn list(&self) -> Result<Vec<Tag>, ApiError>;
}

/// Repository for the ingredient catalog.
pub trait IngredientRepository: Send + Sync {
    /// Fails with `IngredientAlreadyExists` if the (name, unit) pair is taken.
    async fn create(&self, ingredient: &NewIngredient) -> Result<Ingredient, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, ApiError>;
    /// Ingredients whose lower-cased name contains `needle`, ordered by name.
    /// `None` lists the whole catalog.
    async fn search(&self, needle: Option<&str>) -> Result<Vec<Ingredient>, ApiError>;
}

/// Repository for recipes and their tag/ingredient associations.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError>;
    async fn find_short(&self, id: i32) -> Result<Option<ShortRecipe>, ApiError>;
    /// Newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, ApiError>;
    /// Newest first, at most `limit` recipes when given.
    async fn list_short_by_author(
        &self,
        author_id: i32,
        limit: Option<u32>,
    ) -> Result<Vec<ShortRecipe>, ApiError>;
    async fn count_by_author(&self, author_id: i32) -> Result<u64, ApiError>;

    /// Insert the recipe with its associations in one transaction. Returns the new id.
    ///
    /// Fails with `RecipeAlreadyExists` if the author already has a recipe with this name.
    async fn create(&self, recipe: &NewRecipe) -> Result<i32, ApiError>;

    /// Apply `changes` in one transaction. Supplied associations replace the stored ones.
    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), ApiError>;

    /// Delete a recipe. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Repository for favorite, cart and subscription membership rows.
///
/// `target_id` is a recipe id for favorites and carts and an author id for subscriptions.
pub trait RelationRepository: Send + Sync {
    async fn exists(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<bool, ApiError>;

    /// Fails with `AlreadyPerformed` if the row already exists.
    async fn insert(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<(), ApiError>;

    /// Delete a membership row. Returns `true` if a row was deleted.
    async fn delete(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<bool, ApiError>;

    /// The subset of `target_ids` the user holds a `kind` relation to.
    async fn targets_among(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_ids: &[i32],
    ) -> Result<HashSet<i32>, ApiError>;

    /// Authors the user is subscribed to, most recent subscription first.
    async fn list_subscribed_authors(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError>;
}

/// Read port for the shopping list.
pub trait ShoppingCartRepository: Send + Sync {
    /// Every ingredient line of every recipe in the user's cart, ungrouped.
    async fn cart_ingredients(&self, user_id: i32) -> Result<Vec<CartIngredient>, ApiError>;
}
