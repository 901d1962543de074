use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use foodgram_domain::relation::RelationKind;

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("recipe does not exist")]
    RecipeNotFound,
    #[error("author does not exist")]
    AuthorNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    /// The membership row disappeared between the existence check and the delete.
    #[error("not found")]
    RelationNotFound,
    #[error("action already performed")]
    AlreadyPerformed,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("tag already exists")]
    TagAlreadyExists,
    #[error("ingredient already exists")]
    IngredientAlreadyExists,
    #[error("recipe already exists")]
    RecipeAlreadyExists,
    #[error("{}", .0.missing_message())]
    RelationMissing(RelationKind),
    #[error("cannot subscribe to yourself")]
    SelfSubscription,
    #[error("{0}")]
    Validation(String),
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::AuthorNotFound => "AUTHOR_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::RelationNotFound => "RELATION_NOT_FOUND",
            Self::AlreadyPerformed => "ALREADY_PERFORMED",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::IngredientAlreadyExists => "INGREDIENT_ALREADY_EXISTS",
            Self::RecipeAlreadyExists => "RECIPE_ALREADY_EXISTS",
            Self::RelationMissing(_) => "RELATION_MISSING",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::Validation(_) => "VALIDATION",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RecipeNotFound
            | Self::AuthorNotFound
            | Self::UserNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound
            | Self::RelationNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyPerformed
            | Self::UserAlreadyExists
            | Self::TagAlreadyExists
            | Self::IngredientAlreadyExists
            | Self::RecipeAlreadyExists => StatusCode::CONFLICT,
            Self::RelationMissing(_) | Self::SelfSubscription | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
