use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::{IdentityHeaders, MaybeIdentity};
use foodgram_domain::pagination::{DEFAULT_LIMIT, Page, PageRequest};

use crate::domain::types::{Profile, SubscribedAuthor, User};
use crate::error::ApiError;
use crate::handlers::parse_query;
use crate::handlers::recipe::ShortRecipeResponse;
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, ListSubscriptionsUseCase, ListUsersUseCase, RegisterUserInput,
    RegisterUserUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl UserResponse {
    fn new(user: User, is_subscribed: bool) -> Self {
        Self {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

impl From<Profile> for UserResponse {
    fn from(profile: Profile) -> Self {
        Self::new(profile.user, profile.is_subscribed)
    }
}

/// Author the caller follows, with a preview of their recipes.
#[derive(Serialize)]
pub struct SubscribedAuthorResponse {
    #[serde(flatten)]
    pub author: UserResponse,
    pub recipes: Vec<ShortRecipeResponse>,
    pub recipes_count: u64,
}

impl From<SubscribedAuthor> for SubscribedAuthorResponse {
    fn from(sub: SubscribedAuthor) -> Self {
        Self {
            author: UserResponse::new(sub.author, true),
            recipes: sub
                .recipes
                .into_iter()
                .map(ShortRecipeResponse::from)
                .collect(),
            recipes_count: sub.recipes_count,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct UserListQuery {
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Deserialize, Default)]
pub struct SubscriptionListQuery {
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub recipes_limit: Option<u32>,
}

fn page_request(limit: Option<u32>, page: Option<u32>) -> PageRequest {
    PageRequest {
        limit: limit.unwrap_or(DEFAULT_LIMIT),
        page: page.unwrap_or(1),
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let uc = RegisterUserUseCase {
        users: state.user_repo(),
    };
    let user = uc
        .execute(RegisterUserInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    tracing::info!(user_id = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(UserResponse::new(user, false))))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn get_users(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<UserResponse>>, ApiError> {
    let query: UserListQuery = parse_query(raw_query.as_deref())?;
    let uc = ListUsersUseCase {
        users: state.user_repo(),
        relations: state.relation_repo(),
    };
    let page = uc
        .execute(identity.user_id(), page_request(query.limit, query.page))
        .await?;
    Ok(Json(page.map(UserResponse::from)))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
        relations: state.relation_repo(),
    };
    let profile = uc
        .execute(Some(identity.user_id), identity.user_id)
        .await?;
    Ok(Json(profile.into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
        relations: state.relation_repo(),
    };
    let profile = uc.execute(identity.user_id(), user_id).await?;
    Ok(Json(profile.into()))
}

// ── GET /users/subscriptions ─────────────────────────────────────────────────

pub async fn get_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<SubscribedAuthorResponse>>, ApiError> {
    let query: SubscriptionListQuery = parse_query(raw_query.as_deref())?;
    let uc = ListSubscriptionsUseCase {
        relations: state.relation_repo(),
        recipes: state.recipe_repo(),
    };
    let page = uc
        .execute(
            identity.user_id,
            page_request(query.limit, query.page),
            query.recipes_limit,
        )
        .await?;
    Ok(Json(page.map(SubscribedAuthorResponse::from)))
}
