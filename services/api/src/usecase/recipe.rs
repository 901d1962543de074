use std::collections::{HashMap, HashSet};

use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::relation::RelationKind;
use foodgram_domain::validate::{has_max_len, resolve_ids};

use crate::domain::repository::{
    IngredientRepository, RecipeRepository, RelationRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    IngredientAmount, NewRecipe, Profile, Recipe, RecipeChanges, RecipeFilter, RecipeView,
};
use crate::error::ApiError;
use crate::usecase::user::require_active;

pub const NAME_MAX_LEN: usize = 64;
pub const TEXT_MAX_LEN: usize = 1024;
pub const COOKING_TIME_RANGE: (i64, i64) = (1, 300);
pub const AMOUNT_RANGE: (i64, i64) = (1, 30);

/// One `{id, amount}` entry of a recipe payload.
#[derive(Debug, Clone, Copy)]
pub struct IngredientAmountInput {
    pub id: i32,
    pub amount: i64,
}

pub struct CreateRecipeInput {
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmountInput>,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

#[derive(Default)]
pub struct UpdateRecipeInput {
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmountInput>>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
}

// ── Validation ───────────────────────────────────────────────────────────────

fn validate_tags(tags: &[i32]) -> Result<Vec<i32>, ApiError> {
    if tags.is_empty() {
        return Err(ApiError::validation("tags must not be empty"));
    }
    let mut seen = HashSet::new();
    Ok(tags.iter().copied().filter(|id| seen.insert(*id)).collect())
}

fn validate_ingredients(
    ingredients: &[IngredientAmountInput],
) -> Result<Vec<IngredientAmount>, ApiError> {
    if ingredients.is_empty() {
        return Err(ApiError::validation("ingredients must not be empty"));
    }
    let mut seen = HashSet::new();
    ingredients
        .iter()
        .map(|item| {
            if !seen.insert(item.id) {
                return Err(ApiError::validation(format!(
                    "ingredient {} is listed more than once",
                    item.id
                )));
            }
            Ok(IngredientAmount {
                ingredient_id: item.id,
                amount: in_range(item.amount, AMOUNT_RANGE, "amount")?,
            })
        })
        .collect()
}

fn in_range(value: i64, (min, max): (i64, i64), field: &str) -> Result<i16, ApiError> {
    if !(min..=max).contains(&value) {
        return Err(ApiError::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    i16::try_from(value)
        .map_err(|_| ApiError::validation(format!("{field} must be between {min} and {max}")))
}

fn validate_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    if !has_max_len(name, NAME_MAX_LEN) {
        return Err(ApiError::validation(format!(
            "name must be at most {NAME_MAX_LEN} characters"
        )));
    }
    Ok(name.to_owned())
}

fn validate_text(text: &str) -> Result<String, ApiError> {
    if !has_max_len(text, TEXT_MAX_LEN) {
        return Err(ApiError::validation(format!(
            "text must be at most {TEXT_MAX_LEN} characters"
        )));
    }
    Ok(text.to_owned())
}

fn validate_image(image: &str) -> Result<String, ApiError> {
    let image = image.trim();
    if image.is_empty() {
        return Err(ApiError::validation("image must not be empty"));
    }
    Ok(image.to_owned())
}

/// Check a create payload without touching storage.
pub fn validate_create(author_id: i32, input: CreateRecipeInput) -> Result<NewRecipe, ApiError> {
    let tag_ids = validate_tags(&input.tags)?;
    let ingredients = validate_ingredients(&input.ingredients)?;
    let cooking_time = in_range(input.cooking_time, COOKING_TIME_RANGE, "cooking_time")?;
    Ok(NewRecipe {
        author_id,
        name: validate_name(&input.name)?,
        description: validate_text(&input.text)?,
        image: validate_image(&input.image)?,
        cooking_time,
        tag_ids,
        ingredients,
    })
}

/// Check the supplied fields of an update payload without touching storage.
pub fn validate_update(input: UpdateRecipeInput) -> Result<RecipeChanges, ApiError> {
    Ok(RecipeChanges {
        tag_ids: input.tags.as_deref().map(validate_tags).transpose()?,
        ingredients: input
            .ingredients
            .as_deref()
            .map(validate_ingredients)
            .transpose()?,
        cooking_time: input
            .cooking_time
            .map(|t| in_range(t, COOKING_TIME_RANGE, "cooking_time"))
            .transpose()?,
        name: input.name.as_deref().map(validate_name).transpose()?,
        description: input.text.as_deref().map(validate_text).transpose()?,
        image: input.image.as_deref().map(validate_image).transpose()?,
    })
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Make sure every referenced tag and ingredient exists.
async fn resolve_references<T: TagRepository, I: IngredientRepository>(
    tags: &T,
    ingredients: &I,
    tag_ids: Option<&[i32]>,
    amounts: Option<&[IngredientAmount]>,
) -> Result<(), ApiError> {
    if let Some(tag_ids) = tag_ids {
        let found = tags.find_by_ids(tag_ids).await?;
        resolve_ids(tag_ids, found, |t| t.id).map_err(|missing| {
            ApiError::validation(format!("unknown tag ids: {}", join_ids(&missing)))
        })?;
    }
    if let Some(amounts) = amounts {
        let ids: Vec<i32> = amounts.iter().map(|a| a.ingredient_id).collect();
        let found = ingredients.find_by_ids(&ids).await?;
        resolve_ids(&ids, found, |i| i.id).map_err(|missing| {
            ApiError::validation(format!("unknown ingredient ids: {}", join_ids(&missing)))
        })?;
    }
    Ok(())
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R, T, I, U>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    U: UserRepository,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub users: U,
}

impl<R, T, I, U> CreateRecipeUseCase<R, T, I, U>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        author_id: i32,
        input: CreateRecipeInput,
    ) -> Result<Recipe, ApiError> {
        let new = validate_create(author_id, input)?;
        require_active(&self.users, author_id).await?;
        resolve_references(
            &self.tags,
            &self.ingredients,
            Some(&new.tag_ids),
            Some(&new.ingredients),
        )
        .await?;
        let id = self.recipes.create(&new).await?;
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RecipeNotFound)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R, T, I, U>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    U: UserRepository,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub users: U,
}

impl<R, T, I, U> UpdateRecipeUseCase<R, T, I, U>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        user_id: i32,
        is_staff: bool,
        recipe_id: i32,
        input: UpdateRecipeInput,
    ) -> Result<Recipe, ApiError> {
        require_active(&self.users, user_id).await?;
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if !recipe.is_owned_by(user_id) && !is_staff {
            return Err(ApiError::Forbidden);
        }
        let changes = validate_update(input)?;
        resolve_references(
            &self.tags,
            &self.ingredients,
            changes.tag_ids.as_deref(),
            changes.ingredients.as_deref(),
        )
        .await?;
        self.recipes.update(recipe_id, &changes).await?;
        self.recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> DeleteRecipeUseCase<R, U> {
    pub async fn execute(
        &self,
        user_id: i32,
        is_staff: bool,
        recipe_id: i32,
    ) -> Result<(), ApiError> {
        require_active(&self.users, user_id).await?;
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if !recipe.is_owned_by(user_id) && !is_staff {
            return Err(ApiError::Forbidden);
        }
        if !self.recipes.delete(recipe_id).await? {
            return Err(ApiError::RecipeNotFound);
        }
        Ok(())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(&self, recipe_id: i32) -> Result<Recipe, ApiError> {
        self.recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    pub async fn execute(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, ApiError> {
        self.recipes.list(filter, page.clamped()).await
    }
}

// ── DescribeRecipes ──────────────────────────────────────────────────────────

/// Decorate recipes with their author profile and the viewer's favorite/cart flags.
pub struct DescribeRecipesUseCase<U: UserRepository, Rel: RelationRepository> {
    pub users: U,
    pub relations: Rel,
}

impl<U: UserRepository, Rel: RelationRepository> DescribeRecipesUseCase<U, Rel> {
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeView>, ApiError> {
        let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<i32> = recipes.iter().filter_map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<i32, _> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let (favorited, in_cart, subscribed) = match viewer {
            Some(viewer) => (
                self.relations
                    .targets_among(RelationKind::Favorite, viewer, &recipe_ids)
                    .await?,
                self.relations
                    .targets_among(RelationKind::Cart, viewer, &recipe_ids)
                    .await?,
                self.relations
                    .targets_among(RelationKind::Subscription, viewer, &author_ids)
                    .await?,
            ),
            None => Default::default(),
        };

        Ok(recipes
            .into_iter()
            .map(|recipe| {
                let author = recipe
                    .author_id
                    .and_then(|id| authors.get(&id))
                    .map(|user| Profile {
                        user: user.clone(),
                        is_subscribed: subscribed.contains(&user.id),
                    });
                RecipeView {
                    is_favorited: favorited.contains(&recipe.id),
                    is_in_shopping_cart: in_cart.contains(&recipe.id),
                    author,
                    recipe,
                }
            })
            .collect())
    }
}
