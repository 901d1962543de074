//! sea-orm entities for the Foodgram API database.

pub mod amount_ingredients;
pub mod carts;
pub mod favorites;
pub mod ingredients;
pub mod recipe_tags;
pub mod recipes;
pub mod subscriptions;
pub mod tags;
pub mod users;
