use chrono::{DateTime, Utc};

/// Registered user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

/// Normalized registration data, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// A user as seen by the caller.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    /// Whether the caller follows this user. Always `false` for anonymous callers.
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

/// An ingredient together with its amount in one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i16,
}

/// Recipe with its tags and ingredients loaded.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    /// `None` once the author's account is gone.
    pub author_id: Option<i32>,
    pub image: String,
    pub description: String,
    pub cooking_time: i16,
    pub pub_date: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.author_id == Some(user_id)
    }
}

/// Compact recipe view used inside relation responses and subscription lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortRecipe {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i16,
}

/// Recipe decorated with caller-dependent data.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author: Option<Profile>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Requested amount of one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i16,
}

/// Validated recipe, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: i32,
    pub name: String,
    pub image: String,
    pub description: String,
    pub cooking_time: i16,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Validated partial update. `None` leaves the field or association untouched.
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub cooking_time: Option<i16>,
    pub tag_ids: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmount>>,
}

/// Recipe list filters. Every present filter must match.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Tag slugs; a recipe matches if it has any of them.
    pub tags: Vec<String>,
    pub author_id: Option<i32>,
    pub favorited: Option<MembershipFilter>,
    pub in_cart: Option<MembershipFilter>,
}

/// Keep (`member`) or drop (`!member`) the recipes a user holds a relation to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipFilter {
    pub user_id: i32,
    pub member: bool,
}

/// Author a user is subscribed to, with a preview of their recipes.
#[derive(Debug, Clone)]
pub struct SubscribedAuthor {
    pub author: User,
    pub recipes: Vec<ShortRecipe>,
    pub recipes_count: u64,
}

/// What a successfully created relation points at.
#[derive(Debug, Clone)]
pub enum RelationTargetView {
    Recipe(ShortRecipe),
    Author(SubscribedAuthor),
}

/// One ingredient line of one recipe in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIngredient {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Total amount of one (name, unit) pair across a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Rendered shopping list file.
#[derive(Debug, Clone)]
pub struct ShoppingList {
    pub filename: String,
    pub body: String,
}
