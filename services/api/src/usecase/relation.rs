use foodgram_domain::relation::{RelationKind, RelationTarget};

use crate::domain::repository::{RecipeRepository, RelationRepository, UserRepository};
use crate::domain::types::{RelationTargetView, ShortRecipe, SubscribedAuthor, User};
use crate::error::ApiError;
use crate::usecase::user::require_active;

enum Target {
    Recipe(ShortRecipe),
    Author(User),
}

async fn resolve_target<Rec: RecipeRepository, U: UserRepository>(
    recipes: &Rec,
    users: &U,
    kind: RelationKind,
    target_id: i32,
) -> Result<Target, ApiError> {
    match kind.target() {
        RelationTarget::Recipe => recipes
            .find_short(target_id)
            .await?
            .map(Target::Recipe)
            .ok_or(ApiError::RecipeNotFound),
        RelationTarget::Author => users
            .find_by_id(target_id)
            .await?
            .map(Target::Author)
            .ok_or(ApiError::AuthorNotFound),
    }
}

/// Build the subscription view of `author`, embedding at most `recipes_limit` recipes.
pub async fn subscribed_author<Rec: RecipeRepository>(
    recipes: &Rec,
    author: User,
    recipes_limit: Option<u32>,
) -> Result<SubscribedAuthor, ApiError> {
    let preview = recipes
        .list_short_by_author(author.id, recipes_limit)
        .await?;
    let recipes_count = recipes.count_by_author(author.id).await?;
    Ok(SubscribedAuthor {
        author,
        recipes: preview,
        recipes_count,
    })
}

// ── CreateRelation ───────────────────────────────────────────────────────────

pub struct CreateRelationUseCase<Rel, Rec, U>
where
    Rel: RelationRepository,
    Rec: RecipeRepository,
    U: UserRepository,
{
    pub relations: Rel,
    pub recipes: Rec,
    pub users: U,
}

impl<Rel, Rec, U> CreateRelationUseCase<Rel, Rec, U>
where
    Rel: RelationRepository,
    Rec: RecipeRepository,
    U: UserRepository,
{
    /// Add `target_id` to the user's `kind` relation and return a view of the target.
    ///
    /// `recipes_limit` caps the recipes embedded in a subscription view.
    pub async fn execute(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
        recipes_limit: Option<u32>,
    ) -> Result<RelationTargetView, ApiError> {
        if kind == RelationKind::Subscription && target_id == user_id {
            return Err(ApiError::SelfSubscription);
        }
        require_active(&self.users, user_id).await?;
        let target = resolve_target(&self.recipes, &self.users, kind, target_id).await?;
        self.relations.insert(kind, user_id, target_id).await?;
        match target {
            Target::Recipe(recipe) => Ok(RelationTargetView::Recipe(recipe)),
            Target::Author(author) => {
                let view = subscribed_author(&self.recipes, author, recipes_limit).await?;
                Ok(RelationTargetView::Author(view))
            }
        }
    }
}

// ── DeleteRelation ───────────────────────────────────────────────────────────

pub struct DeleteRelationUseCase<Rel, Rec, U>
where
    Rel: RelationRepository,
    Rec: RecipeRepository,
    U: UserRepository,
{
    pub relations: Rel,
    pub recipes: Rec,
    pub users: U,
}

impl<Rel, Rec, U> DeleteRelationUseCase<Rel, Rec, U>
where
    Rel: RelationRepository,
    Rec: RecipeRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<(), ApiError> {
        require_active(&self.users, user_id).await?;
        resolve_target(&self.recipes, &self.users, kind, target_id).await?;
        if !self.relations.exists(kind, user_id, target_id).await? {
            return Err(ApiError::RelationMissing(kind));
        }
        // A concurrent request may have removed the row after the check.
        if !self.relations.delete(kind, user_id, target_id).await? {
            return Err(ApiError::RelationNotFound);
        }
        Ok(())
    }
}
