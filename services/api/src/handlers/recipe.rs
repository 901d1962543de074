use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::{IdentityHeaders, MaybeIdentity};
use foodgram_domain::pagination::{DEFAULT_LIMIT, Page, PageRequest};

use crate::domain::types::{
    MembershipFilter, Recipe, RecipeFilter, RecipeIngredient, RecipeView, ShortRecipe,
};
use crate::error::ApiError;
use crate::handlers::parse_flag;
use crate::handlers::tag::TagResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, DescribeRecipesUseCase,
    GetRecipeUseCase, IngredientAmountInput, ListRecipesUseCase, UpdateRecipeInput,
    UpdateRecipeUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i64,
}

impl From<IngredientAmountRequest> for IngredientAmountInput {
    fn from(req: IngredientAmountRequest) -> Self {
        Self {
            id: req.id,
            amount: req.amount,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountRequest>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub text: String,
    pub cooking_time: i64,
}

#[derive(Deserialize, Default)]
pub struct UpdateRecipeRequest {
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i16,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(item: RecipeIngredient) -> Self {
        Self {
            id: item.ingredient.id,
            name: item.ingredient.name,
            measurement_unit: item.ingredient.measurement_unit,
            amount: item.amount,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    /// `null` once the author's account is gone.
    pub author: Option<UserResponse>,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i16,
    #[serde(serialize_with = "foodgram_core::serde::to_rfc3339_ms")]
    pub pub_date: DateTime<Utc>,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        let recipe = view.recipe;
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
            author: view.author.map(UserResponse::from),
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.description,
            cooking_time: recipe.cooking_time,
            pub_date: recipe.pub_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShortRecipeResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i16,
}

impl From<ShortRecipe> for ShortRecipeResponse {
    fn from(recipe: ShortRecipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

/// `GET /recipes` filters. `tags` may repeat: `?tags=breakfast&tags=dinner`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecipeListQuery {
    pub tags: Vec<String>,
    pub author: Option<i32>,
    /// `Some(false)` excludes the caller's favorites.
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::validation(format!("{name} must be a number")))
}

fn membership(viewer: Option<i32>, flag: Option<bool>) -> Option<MembershipFilter> {
    viewer
        .zip(flag)
        .map(|(user_id, member)| MembershipFilter { user_id, member })
}

impl RecipeListQuery {
    /// Build from raw key/value pairs. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "tags" | "tags[]" => query.tags.push(value),
                "author" => query.author = Some(parse_number(&key, &value)?),
                "is_favorited" => query.is_favorited = Some(parse_flag(&key, &value)?),
                "is_in_shopping_cart" => {
                    query.is_in_shopping_cart = Some(parse_flag(&key, &value)?);
                }
                "limit" => query.limit = Some(parse_number(&key, &value)?),
                "page" => query.page = Some(parse_number(&key, &value)?),
                _ => {}
            }
        }
        Ok(query)
    }

    /// Membership filters only apply to identified callers.
    pub fn filter(&self, viewer: Option<i32>) -> RecipeFilter {
        RecipeFilter {
            tags: self.tags.clone(),
            author_id: self.author,
            favorited: membership(viewer, self.is_favorited),
            in_cart: membership(viewer, self.is_in_shopping_cart),
        }
    }

    pub fn page(&self) -> PageRequest {
        PageRequest {
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            page: self.page.unwrap_or(1),
        }
    }
}

async fn describe(
    state: &AppState,
    viewer: Option<i32>,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeResponse>, ApiError> {
    let uc = DescribeRecipesUseCase {
        users: state.user_repo(),
        relations: state.relation_repo(),
    };
    let views = uc.execute(viewer, recipes).await?;
    Ok(views.into_iter().map(RecipeResponse::from).collect())
}

async fn describe_one(
    state: &AppState,
    viewer: Option<i32>,
    recipe: Recipe,
) -> Result<RecipeResponse, ApiError> {
    describe(state, viewer, vec![recipe])
        .await?
        .pop()
        .ok_or(ApiError::RecipeNotFound)
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn get_recipes(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<RecipeResponse>>, ApiError> {
    let query = RecipeListQuery::from_pairs(pairs)?;
    let viewer = identity.user_id();
    let uc = ListRecipesUseCase {
        recipes: state.recipe_repo(),
    };
    let page = uc.execute(&query.filter(viewer), query.page()).await?;
    let results = describe(&state, viewer, page.results).await?;
    Ok(Json(Page::new(page.count, results)))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let uc = GetRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe = uc.execute(recipe_id).await?;
    Ok(Json(describe_one(&state, identity.user_id(), recipe).await?))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let uc = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        users: state.user_repo(),
    };
    let input = CreateRecipeInput {
        tags: body.tags,
        ingredients: body.ingredients.into_iter().map(Into::into).collect(),
        name: body.name,
        image: body.image,
        text: body.text,
        cooking_time: body.cooking_time,
    };
    let recipe = uc.execute(identity.user_id, input).await?;
    tracing::info!(recipe_id = recipe.id, author_id = identity.user_id, "recipe created");
    let response = describe_one(&state, Some(identity.user_id), recipe).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Json(body): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let uc = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        users: state.user_repo(),
    };
    let input = UpdateRecipeInput {
        tags: body.tags,
        ingredients: body
            .ingredients
            .map(|items| items.into_iter().map(Into::into).collect()),
        name: body.name,
        image: body.image,
        text: body.text,
        cooking_time: body.cooking_time,
    };
    let recipe = uc
        .execute(identity.user_id, identity.is_staff(), recipe_id, input)
        .await?;
    Ok(Json(
        describe_one(&state, Some(identity.user_id), recipe).await?,
    ))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let uc = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    uc.execute(identity.user_id, identity.is_staff(), recipe_id)
        .await?;
    tracing::info!(recipe_id, user_id = identity.user_id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}
