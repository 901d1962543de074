use foodgram_domain::validate::{
    has_max_len, is_single_alphabet_name, is_valid_slug, normalize_hex_color,
};

use crate::domain::repository::{TagRepository, UserRepository};
use crate::domain::types::{NewTag, Tag};
use crate::error::ApiError;
use crate::usecase::user::require_active;

pub const TAG_NAME_MAX_LEN: usize = 64;
pub const TAG_SLUG_MAX_LEN: usize = 64;

pub struct CreateTagInput {
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Check and normalize a tag payload.
pub fn validate_tag(input: CreateTagInput) -> Result<NewTag, ApiError> {
    let name = input.name.trim().to_lowercase();
    if !has_max_len(&name, TAG_NAME_MAX_LEN) || !is_single_alphabet_name(&name) {
        return Err(ApiError::validation(format!(
            "name must be at most {TAG_NAME_MAX_LEN} letters of one alphabet, spaces and hyphens"
        )));
    }
    let color = normalize_hex_color(&input.color)
        .ok_or_else(|| ApiError::validation("color must be a hex color like #E26C2D"))?;
    let slug = input.slug.trim();
    if !has_max_len(slug, TAG_SLUG_MAX_LEN) || !is_valid_slug(slug) {
        return Err(ApiError::validation(
            "slug must be lower-case letters, digits, '-' or '_'",
        ));
    }
    Ok(NewTag {
        name,
        color,
        slug: slug.to_owned(),
    })
}

// ── CreateTag ────────────────────────────────────────────────────────────────

pub struct CreateTagUseCase<T: TagRepository, U: UserRepository> {
    pub tags: T,
    pub users: U,
}

impl<T: TagRepository, U: UserRepository> CreateTagUseCase<T, U> {
    pub async fn execute(
        &self,
        user_id: i32,
        is_staff: bool,
        input: CreateTagInput,
    ) -> Result<Tag, ApiError> {
        if !is_staff {
            return Err(ApiError::Forbidden);
        }
        let new = validate_tag(input)?;
        require_active(&self.users, user_id).await?;
        self.tags.create(&new).await
    }
}

// ── GetTag ───────────────────────────────────────────────────────────────────

pub struct GetTagUseCase<T: TagRepository> {
    pub tags: T,
}

impl<T: TagRepository> GetTagUseCase<T> {
    pub async fn execute(&self, id: i32) -> Result<Tag, ApiError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TagNotFound)
    }
}

// ── ListTags ─────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<T: TagRepository> {
    pub tags: T,
}

impl<T: TagRepository> ListTagsUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<Tag>, ApiError> {
        self.tags.list().await
    }
}
