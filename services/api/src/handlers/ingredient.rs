use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::types::Ingredient;
use crate::error::ApiError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::ingredient::{
    CreateIngredientInput, CreateIngredientUseCase, GetIngredientUseCase,
    SearchIngredientsUseCase,
};

#[derive(Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Deserialize, Default)]
pub struct IngredientSearchQuery {
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

// ── GET /ingredients ─────────────────────────────────────────────────────────

pub async fn get_ingredients(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<IngredientResponse>>, ApiError> {
    let query: IngredientSearchQuery = parse_query(raw_query.as_deref())?;
    let uc = SearchIngredientsUseCase {
        ingredients: state.ingredient_repo(),
    };
    let found = uc.execute(query.name.as_deref()).await?;
    Ok(Json(found.into_iter().map(IngredientResponse::from).collect()))
}

// ── GET /ingredients/{id} ────────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(ingredient_id): Path<i32>,
) -> Result<Json<IngredientResponse>, ApiError> {
    let uc = GetIngredientUseCase {
        ingredients: state.ingredient_repo(),
    };
    Ok(Json(uc.execute(ingredient_id).await?.into()))
}

// ── POST /ingredients ────────────────────────────────────────────────────────

pub async fn create_ingredient(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<IngredientResponse>), ApiError> {
    let uc = CreateIngredientUseCase {
        ingredients: state.ingredient_repo(),
        users: state.user_repo(),
    };
    let ingredient = uc
        .execute(
            identity.user_id,
            identity.is_staff(),
            CreateIngredientInput {
                name: body.name,
                measurement_unit: body.measurement_unit,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ingredient.into())))
}
