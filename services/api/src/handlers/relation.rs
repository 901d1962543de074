use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::relation::RelationKind;

use crate::domain::types::RelationTargetView;
use crate::error::ApiError;
use crate::handlers::parse_query;
use crate::handlers::recipe::ShortRecipeResponse;
use crate::handlers::user::SubscribedAuthorResponse;
use crate::state::AppState;
use crate::usecase::relation::{CreateRelationUseCase, DeleteRelationUseCase};

#[derive(Serialize)]
#[serde(untagged)]
pub enum RelationResponse {
    Recipe(ShortRecipeResponse),
    Author(SubscribedAuthorResponse),
}

impl From<RelationTargetView> for RelationResponse {
    fn from(view: RelationTargetView) -> Self {
        match view {
            RelationTargetView::Recipe(recipe) => Self::Recipe(recipe.into()),
            RelationTargetView::Author(author) => Self::Author(author.into()),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct SubscribeQuery {
    pub recipes_limit: Option<u32>,
}

async fn create_relation(
    state: &AppState,
    kind: RelationKind,
    user_id: i32,
    target_id: i32,
    recipes_limit: Option<u32>,
) -> Result<(StatusCode, Json<RelationResponse>), ApiError> {
    let uc = CreateRelationUseCase {
        relations: state.relation_repo(),
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let view = uc
        .execute(kind, user_id, target_id, recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

async fn delete_relation(
    state: &AppState,
    kind: RelationKind,
    user_id: i32,
    target_id: i32,
) -> Result<StatusCode, ApiError> {
    let uc = DeleteRelationUseCase {
        relations: state.relation_repo(),
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    uc.execute(kind, user_id, target_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /recipes/{id}/favorite ──────────────────────────────────────────────

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RelationResponse>), ApiError> {
    create_relation(
        &state,
        RelationKind::Favorite,
        identity.user_id,
        recipe_id,
        None,
    )
    .await
}

// ── DELETE /recipes/{id}/favorite ────────────────────────────────────────────

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    delete_relation(&state, RelationKind::Favorite, identity.user_id, recipe_id).await
}

// ── POST /recipes/{id}/shopping_cart ─────────────────────────────────────────

pub async fn add_to_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RelationResponse>), ApiError> {
    create_relation(&state, RelationKind::Cart, identity.user_id, recipe_id, None).await
}

// ── DELETE /recipes/{id}/shopping_cart ───────────────────────────────────────

pub async fn remove_from_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    delete_relation(&state, RelationKind::Cart, identity.user_id, recipe_id).await
}

// ── POST /users/{id}/subscribe ───────────────────────────────────────────────

pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
    RawQuery(raw_query): RawQuery,
) -> Result<(StatusCode, Json<RelationResponse>), ApiError> {
    let query: SubscribeQuery = parse_query(raw_query.as_deref())?;
    create_relation(
        &state,
        RelationKind::Subscription,
        identity.user_id,
        author_id,
        query.recipes_limit,
    )
    .await
}

// ── DELETE /users/{id}/subscribe ─────────────────────────────────────────────

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    delete_relation(
        &state,
        RelationKind::Subscription,
        identity.user_id,
        author_id,
    )
    .await
}
