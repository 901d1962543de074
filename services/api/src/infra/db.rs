use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    Statement, TransactionError, TransactionTrait,
    sea_query::{Expr, Query, SelectStatement, SimpleExpr},
};

use foodgram_api_schema::{
    amount_ingredients, carts, favorites, ingredients, recipe_tags, recipes, subscriptions, tags,
    users,
};
use foodgram_core::sea_ext::{
    contains_pattern, flatten_transaction_error, foreign_key_violation, is_foreign_key_violation,
    is_unique_violation,
};
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::relation::{RelationKind, RelationTarget};

use crate::domain::repository::{
    IngredientRepository, RecipeRepository, RelationRepository, ShoppingCartRepository,
    TagRepository, UserRepository,
};
use crate::domain::types::{
    CartIngredient, Ingredient, IngredientAmount, NewIngredient, NewRecipe, NewTag, NewUser,
    Recipe, RecipeChanges, RecipeFilter, RecipeIngredient, ShortRecipe, Tag, User,
};
use crate::error::ApiError;

/// Unique violations become `conflict`; anything else is an internal error.
fn write_error(err: DbErr, conflict: ApiError, context: &'static str) -> ApiError {
    if is_unique_violation(&err) {
        conflict
    } else {
        ApiError::Internal(anyhow::Error::new(err).context(context))
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let model = users::ActiveModel {
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            is_active: Set(true),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, ApiError::UserAlreadyExists, "create user"))?;
        Ok(user_from_model(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, ApiError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError> {
        let page = page.clamped();
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Page::new(
            count,
            models.into_iter().map(user_from_model).collect(),
        ))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        is_active: model.is_active,
        date_joined: model.date_joined,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn create(&self, tag: &NewTag) -> Result<Tag, ApiError> {
        let model = tags::ActiveModel {
            name: Set(tag.name.clone()),
            color: Set(tag.color.clone()),
            slug: Set(tag.slug.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, ApiError::TagAlreadyExists, "create tag"))?;
        Ok(tag_from_model(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, ApiError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn create(&self, ingredient: &NewIngredient) -> Result<Ingredient, ApiError> {
        let model = ingredients::ActiveModel {
            name: Set(ingredient.name.clone()),
            measurement_unit: Set(ingredient.measurement_unit.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, ApiError::IngredientAlreadyExists, "create ingredient"))?;
        Ok(ingredient_from_model(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, ApiError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn search(&self, needle: Option<&str>) -> Result<Vec<Ingredient>, ApiError> {
        let mut query = ingredients::Entity::find();
        // Names are stored lower-cased, so a plain LIKE is case-insensitive here.
        if let Some(needle) = needle {
            query = query.filter(ingredients::Column::Name.like(contains_pattern(needle)));
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::MeasurementUnit)
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl DbRecipeRepository {
    fn filtered(filter: &RecipeFilter) -> Select<recipes::Entity> {
        let mut query = recipes::Entity::find();
        if !filter.tags.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(recipe_tags::Column::RecipeId)
                        .from(recipe_tags::Entity)
                        .and_where(
                            recipe_tags::Column::TagId.in_subquery(
                                Query::select()
                                    .column(tags::Column::Id)
                                    .from(tags::Entity)
                                    .and_where(
                                        tags::Column::Slug.is_in(filter.tags.iter().cloned()),
                                    )
                                    .to_owned(),
                            ),
                        )
                        .to_owned(),
                ),
            );
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if let Some(favorited) = filter.favorited {
            let members = Query::select()
                .column(favorites::Column::RecipeId)
                .from(favorites::Entity)
                .and_where(favorites::Column::UserId.eq(favorited.user_id))
                .to_owned();
            query = query.filter(membership(members, favorited.member));
        }
        if let Some(in_cart) = filter.in_cart {
            let members = Query::select()
                .column(carts::Column::RecipeId)
                .from(carts::Entity)
                .and_where(carts::Column::UserId.eq(in_cart.user_id))
                .to_owned();
            query = query.filter(membership(members, in_cart.member));
        }
        query
    }
}

fn membership(members: SelectStatement, member: bool) -> SimpleExpr {
    if member {
        recipes::Column::Id.in_subquery(members)
    } else {
        recipes::Column::Id.not_in_subquery(members)
    }
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError> {
        let Some(model) = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        let recipe = load_recipes(&self.db, vec![model])
            .await
            .context("load recipe associations")?
            .pop();
        Ok(recipe)
    }

    async fn find_short(&self, id: i32) -> Result<Option<ShortRecipe>, ApiError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find short recipe by id")?;
        Ok(model.map(short_recipe_from_model))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, ApiError> {
        let page = page.clamped();
        let query = Self::filtered(filter);
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = query
            .order_by_desc(recipes::Column::PubDate)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list recipes")?;
        let recipes = load_recipes(&self.db, models)
            .await
            .context("load recipe associations")?;
        Ok(Page::new(count, recipes))
    }

    async fn list_short_by_author(
        &self,
        author_id: i32,
        limit: Option<u32>,
    ) -> Result<Vec<ShortRecipe>, ApiError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::PubDate)
            .order_by_desc(recipes::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(u64::from(limit));
        }
        let models = query
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models.into_iter().map(short_recipe_from_model).collect())
    }

    async fn count_by_author(&self, author_id: i32) -> Result<u64, ApiError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(count)
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<i32, ApiError> {
        self.db
            .transaction::<_, i32, DbErr>(|txn| {
                let recipe = recipe.clone();
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        name: Set(recipe.name),
                        author_id: Set(Some(recipe.author_id)),
                        image: Set(recipe.image),
                        description: Set(recipe.description),
                        cooking_time: Set(recipe.cooking_time),
                        pub_date: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    insert_tags(txn, model.id, &recipe.tag_ids).await?;
                    insert_ingredients(txn, model.id, &recipe.ingredients).await?;
                    Ok(model.id)
                })
            })
            .await
            .map_err(|e| recipe_write_error(e, "create recipe"))
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let mut update =
                        recipes::Entity::update_many().filter(recipes::Column::Id.eq(id));
                    let mut dirty = false;
                    if let Some(name) = changes.name {
                        update = update.col_expr(recipes::Column::Name, Expr::value(name));
                        dirty = true;
                    }
                    if let Some(image) = changes.image {
                        update = update.col_expr(recipes::Column::Image, Expr::value(image));
                        dirty = true;
                    }
                    if let Some(description) = changes.description {
                        update =
                            update.col_expr(recipes::Column::Description, Expr::value(description));
                        dirty = true;
                    }
                    if let Some(cooking_time) = changes.cooking_time {
                        update =
                            update.col_expr(recipes::Column::CookingTime, Expr::value(cooking_time));
                        dirty = true;
                    }
                    if dirty {
                        update.exec(txn).await?;
                    }

                    if let Some(tag_ids) = changes.tag_ids {
                        recipe_tags::Entity::delete_many()
                            .filter(recipe_tags::Column::RecipeId.eq(id))
                            .exec(txn)
                            .await?;
                        insert_tags(txn, id, &tag_ids).await?;
                    }
                    if let Some(amounts) = changes.ingredients {
                        amount_ingredients::Entity::delete_many()
                            .filter(amount_ingredients::Column::RecipeId.eq(id))
                            .exec(txn)
                            .await?;
                        insert_ingredients(txn, id, &amounts).await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(|e| recipe_write_error(e, "update recipe"))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }
}

/// Constraint tying `recipes.author_id` to `users.id`.
const RECIPE_AUTHOR_FK: &str = "fk_recipes_author_id";

fn recipe_write_error(err: TransactionError<DbErr>, context: &'static str) -> ApiError {
    let err = flatten_transaction_error(err);
    if let Some(message) = foreign_key_violation(&err) {
        return recipe_reference_error(&message);
    }
    write_error(err, ApiError::RecipeAlreadyExists, context)
}

/// A vanished author account loses write access; anything else is a stale tag or ingredient.
fn recipe_reference_error(message: &str) -> ApiError {
    if message.contains(RECIPE_AUTHOR_FK) {
        ApiError::Forbidden
    } else {
        ApiError::validation("a referenced tag or ingredient no longer exists")
    }
}

async fn insert_tags<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    tag_ids: &[i32],
) -> Result<(), DbErr> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    recipe_tags::Entity::insert_many(tag_ids.iter().map(|&tag_id| recipe_tags::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(tag_id),
    }))
    .exec_without_returning(db)
    .await?;
    Ok(())
}

async fn insert_ingredients<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    amounts: &[IngredientAmount],
) -> Result<(), DbErr> {
    if amounts.is_empty() {
        return Ok(());
    }
    amount_ingredients::Entity::insert_many(amounts.iter().map(|a| {
        amount_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(a.ingredient_id),
            amount: Set(a.amount),
        }
    }))
    .exec_without_returning(db)
    .await?;
    Ok(())
}

/// Attach tags and ingredients to recipe rows, keeping the input order.
async fn load_recipes<C: ConnectionTrait>(
    db: &C,
    models: Vec<recipes::Model>,
) -> Result<Vec<Recipe>, DbErr> {
    if models.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

    let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
    let tag_rows = recipe_tags::Entity::find()
        .filter(recipe_tags::Column::RecipeId.is_in(ids.iter().copied()))
        .find_also_related(tags::Entity)
        .order_by_asc(tags::Column::Name)
        .all(db)
        .await?;
    for (link, tag) in tag_rows {
        if let Some(tag) = tag {
            tags_by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(tag_from_model(tag));
        }
    }

    let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
    let ingredient_rows = amount_ingredients::Entity::find()
        .filter(amount_ingredients::Column::RecipeId.is_in(ids.iter().copied()))
        .find_also_related(ingredients::Entity)
        .order_by_asc(ingredients::Column::Name)
        .all(db)
        .await?;
    for (link, ingredient) in ingredient_rows {
        if let Some(ingredient) = ingredient {
            ingredients_by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    ingredient: ingredient_from_model(ingredient),
                    amount: link.amount,
                });
        }
    }

    Ok(models
        .into_iter()
        .map(|model| Recipe {
            tags: tags_by_recipe.remove(&model.id).unwrap_or_default(),
            ingredients: ingredients_by_recipe.remove(&model.id).unwrap_or_default(),
            id: model.id,
            name: model.name,
            author_id: model.author_id,
            image: model.image,
            description: model.description,
            cooking_time: model.cooking_time,
            pub_date: model.pub_date,
        })
        .collect())
}

fn short_recipe_from_model(model: recipes::Model) -> ShortRecipe {
    ShortRecipe {
        id: model.id,
        name: model.name,
        image: model.image,
        cooking_time: model.cooking_time,
    }
}

// ── Relation repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRelationRepository {
    pub db: DatabaseConnection,
}

fn relation_insert_error(kind: RelationKind, err: DbErr) -> ApiError {
    if is_foreign_key_violation(&err) {
        return match kind.target() {
            RelationTarget::Recipe => ApiError::RecipeNotFound,
            RelationTarget::Author => ApiError::AuthorNotFound,
        };
    }
    write_error(err, ApiError::AlreadyPerformed, "insert relation")
}

impl RelationRepository for DbRelationRepository {
    async fn exists(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<bool, ApiError> {
        let key = (user_id, target_id);
        let found = match kind {
            RelationKind::Favorite => favorites::Entity::find_by_id(key)
                .one(&self.db)
                .await
                .map(|m| m.is_some()),
            RelationKind::Cart => carts::Entity::find_by_id(key)
                .one(&self.db)
                .await
                .map(|m| m.is_some()),
            RelationKind::Subscription => subscriptions::Entity::find_by_id(key)
                .one(&self.db)
                .await
                .map(|m| m.is_some()),
        }
        .context("check relation exists")?;
        Ok(found)
    }

    async fn insert(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<(), ApiError> {
        let added_at = Utc::now();
        let result = match kind {
            RelationKind::Favorite => favorites::ActiveModel {
                user_id: Set(user_id),
                recipe_id: Set(target_id),
                added_at: Set(added_at),
            }
            .insert(&self.db)
            .await
            .map(|_| ()),
            RelationKind::Cart => carts::ActiveModel {
                user_id: Set(user_id),
                recipe_id: Set(target_id),
                added_at: Set(added_at),
            }
            .insert(&self.db)
            .await
            .map(|_| ()),
            RelationKind::Subscription => subscriptions::ActiveModel {
                user_id: Set(user_id),
                author_id: Set(target_id),
                added_at: Set(added_at),
            }
            .insert(&self.db)
            .await
            .map(|_| ()),
        };
        result.map_err(|e| relation_insert_error(kind, e))
    }

    async fn delete(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<bool, ApiError> {
        let key = (user_id, target_id);
        let result = match kind {
            RelationKind::Favorite => favorites::Entity::delete_by_id(key).exec(&self.db).await,
            RelationKind::Cart => carts::Entity::delete_by_id(key).exec(&self.db).await,
            RelationKind::Subscription => {
                subscriptions::Entity::delete_by_id(key)
                    .exec(&self.db)
                    .await
            }
        }
        .context("delete relation")?;
        Ok(result.rows_affected > 0)
    }

    async fn targets_among(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_ids: &[i32],
    ) -> Result<HashSet<i32>, ApiError> {
        if target_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = target_ids.iter().copied();
        let found = match kind {
            RelationKind::Favorite => {
                favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.is_in(ids))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
            RelationKind::Cart => {
                carts::Entity::find()
                    .select_only()
                    .column(carts::Column::RecipeId)
                    .filter(carts::Column::UserId.eq(user_id))
                    .filter(carts::Column::RecipeId.is_in(ids))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
            RelationKind::Subscription => {
                subscriptions::Entity::find()
                    .select_only()
                    .column(subscriptions::Column::AuthorId)
                    .filter(subscriptions::Column::UserId.eq(user_id))
                    .filter(subscriptions::Column::AuthorId.is_in(ids))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
        }
        .context("find related targets")?;
        Ok(found.into_iter().collect())
    }

    async fn list_subscribed_authors(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        let page = page.clamped();
        let query =
            subscriptions::Entity::find().filter(subscriptions::Column::UserId.eq(user_id));
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count subscriptions")?;
        let author_ids: Vec<i32> = query
            .select_only()
            .column(subscriptions::Column::AuthorId)
            .order_by_desc(subscriptions::Column::AddedAt)
            .order_by_asc(subscriptions::Column::AuthorId)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("list subscribed author ids")?;
        if author_ids.is_empty() {
            return Ok(Page::new(count, vec![]));
        }
        let mut by_id: HashMap<i32, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find subscribed authors")?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let authors = author_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(user_from_model)
            .collect();
        Ok(Page::new(count, authors))
    }
}

// ── Shopping cart repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShoppingCartRepository {
    pub db: DatabaseConnection,
}

impl ShoppingCartRepository for DbShoppingCartRepository {
    async fn cart_ingredients(&self, user_id: i32) -> Result<Vec<CartIngredient>, ApiError> {
        #[derive(Debug, FromQueryResult)]
        struct CartLineRow {
            name: String,
            measurement_unit: String,
            amount: i64,
        }

        let rows = CartLineRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT i.name, i.measurement_unit, ai.amount::BIGINT AS amount
                FROM carts c
                JOIN amount_ingredients ai ON ai.recipe_id = c.recipe_id
                JOIN ingredients i ON i.id = ai.ingredient_id
                WHERE c.user_id = $1
            "#,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("list cart ingredients")?;

        Ok(rows
            .into_iter()
            .map(|row| CartIngredient {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            })
            .collect())
    }
}
