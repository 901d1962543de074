use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use foodgram_core::health::healthz;
use foodgram_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    health::readyz,
    ingredient::{create_ingredient, get_ingredient, get_ingredients},
    recipe::{create_recipe, delete_recipe, get_recipe, get_recipes, update_recipe},
    relation::{
        add_favorite, add_to_cart, remove_favorite, remove_from_cart, subscribe, unsubscribe,
    },
    shopping_list::download_shopping_cart,
    tag::{create_tag, get_tag, get_tags},
    user::{create_user, get_me, get_subscriptions, get_user, get_users},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(create_user).get(get_users))
        .route("/users/me", get(get_me))
        .route("/users/subscriptions", get(get_subscriptions))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/subscribe", post(subscribe).delete(unsubscribe))
        // Tags
        .route("/tags", get(get_tags).post(create_tag))
        .route("/tags/{id}", get(get_tag))
        // Ingredients
        .route("/ingredients", get(get_ingredients).post(create_ingredient))
        .route("/ingredients/{id}", get(get_ingredient))
        // Recipes
        .route("/recipes", get(get_recipes).post(create_recipe))
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_cart),
        )
        .route(
            "/recipes/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route(
            "/recipes/{id}/favorite",
            post(add_favorite).delete(remove_favorite),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_cart).delete(remove_from_cart),
        )
        // Later layers wrap earlier ones: the id is set before tracing and copied back last.
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
