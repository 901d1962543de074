use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::relation::RelationKind;
use foodgram_domain::validate::{
    has_max_len, is_single_alphabet_name, is_valid_email, is_valid_username,
    normalize_email, normalize_human_name,
};

use crate::domain::repository::{RecipeRepository, RelationRepository, UserRepository};
use crate::domain::types::{NewUser, Profile, SubscribedAuthor, User};
use crate::error::ApiError;
use crate::usecase::relation::subscribed_author;

pub const EMAIL_MAX_LEN: usize = 256;
pub const HUMAN_NAME_MAX_LEN: usize = 32;

pub struct RegisterUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

fn validate_human_name(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() || !has_max_len(value, HUMAN_NAME_MAX_LEN) {
        return Err(ApiError::validation(format!(
            "{field} must be 1 to {HUMAN_NAME_MAX_LEN} characters"
        )));
    }
    if !is_single_alphabet_name(value) {
        return Err(ApiError::validation(format!(
            "{field} must use letters of one alphabet, spaces and hyphens"
        )));
    }
    Ok(normalize_human_name(value))
}

/// Check and normalize a registration payload.
pub fn validate_registration(input: RegisterUserInput) -> Result<NewUser, ApiError> {
    let email = normalize_email(&input.email);
    if !is_valid_email(&email) || !has_max_len(&email, EMAIL_MAX_LEN) {
        return Err(ApiError::validation("invalid email"));
    }
    let username = input.username.trim();
    if !is_valid_username(username) {
        return Err(ApiError::validation(
            "username must be 3 to 32 characters of letters, digits and .@+-_",
        ));
    }
    Ok(NewUser {
        email,
        username: username.to_owned(),
        first_name: validate_human_name("first_name", &input.first_name)?,
        last_name: validate_human_name("last_name", &input.last_name)?,
    })
}

/// The acting account, provided it may write. Missing and disabled accounts are forbidden.
pub async fn require_active<U: UserRepository>(users: &U, user_id: i32) -> Result<User, ApiError> {
    match users.find_by_id(user_id).await? {
        Some(user) if user.is_active => Ok(user),
        _ => Err(ApiError::Forbidden),
    }
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, ApiError> {
        let new = validate_registration(input)?;
        self.users.create(&new).await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository, Rel: RelationRepository> {
    pub users: U,
    pub relations: Rel,
}

impl<U: UserRepository, Rel: RelationRepository> GetUserUseCase<U, Rel> {
    /// Look up a profile as seen by `viewer`.
    pub async fn execute(&self, viewer: Option<i32>, user_id: i32) -> Result<Profile, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let mut profiles = profiles(&self.relations, viewer, vec![user]).await?;
        profiles.pop().ok_or(ApiError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository, Rel: RelationRepository> {
    pub users: U,
    pub relations: Rel,
}

impl<U: UserRepository, Rel: RelationRepository> ListUsersUseCase<U, Rel> {
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<Profile>, ApiError> {
        let page = self.users.list(page.clamped()).await?;
        let count = page.count;
        let results = profiles(&self.relations, viewer, page.results).await?;
        Ok(Page::new(count, results))
    }
}

async fn profiles<Rel: RelationRepository>(
    relations: &Rel,
    viewer: Option<i32>,
    users: Vec<User>,
) -> Result<Vec<Profile>, ApiError> {
    let subscribed = match viewer {
        Some(viewer) => {
            let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
            relations
                .targets_among(RelationKind::Subscription, viewer, &ids)
                .await?
        }
        None => Default::default(),
    };
    Ok(users
        .into_iter()
        .map(|user| Profile {
            is_subscribed: subscribed.contains(&user.id),
            user,
        })
        .collect())
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<Rel: RelationRepository, R: RecipeRepository> {
    pub relations: Rel,
    pub recipes: R,
}

impl<Rel: RelationRepository, R: RecipeRepository> ListSubscriptionsUseCase<Rel, R> {
    pub async fn execute(
        &self,
        user_id: i32,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Page<SubscribedAuthor>, ApiError> {
        let authors = self
            .relations
            .list_subscribed_authors(user_id, page.clamped())
            .await?;
        let mut results = Vec::with_capacity(authors.results.len());
        for author in authors.results {
            results.push(subscribed_author(&self.recipes, author, recipes_limit).await?);
        }
        Ok(Page::new(authors.count, results))
    }
}
