use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_testing::auth::MockAuth;

/// Server whose database is unreachable; only paths that fail before storage are exercised.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
    };
    TestServer::new(build_router(state)).unwrap()
}

fn with_auth(mut request: TestRequest, auth: &MockAuth) -> TestRequest {
    for (name, value) in auth.headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }
    request
}

fn recipe_body(tags: Value) -> Value {
    json!({
        "tags": tags,
        "ingredients": [{"id": 1, "amount": 10}],
        "name": "Pancakes",
        "image": "data:image/png;base64,AAAA",
        "text": "Whisk and fry.",
        "cooking_time": 20
    })
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_liveness() {
    let res = server().get("/healthz").await;
    res.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_report_unready_without_database() {
    let res = server().get("/readyz").await;
    res.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_echo_request_id_header() {
    let res = server().get("/healthz").await;
    assert!(res.headers().contains_key("x-request-id"));
}

// ── Identity ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_recipe_creation_without_identity() {
    let res = server()
        .post("/recipes")
        .json(&recipe_body(json!([1])))
        .await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_favorite_without_identity() {
    let res = server().post("/recipes/1/favorite").await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_shopping_list_download_without_identity() {
    let res = server().get("/recipes/download_shopping_cart").await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

// ── Validation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_recipe_with_empty_tags() {
    let request = server().post("/recipes").json(&recipe_body(json!([])));
    let res = with_auth(request, &MockAuth::user(1)).await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["error"], "tags must not be empty");
}

#[tokio::test]
async fn should_reject_recipe_with_cooking_time_out_of_range() {
    let mut body = recipe_body(json!([1]));
    body["cooking_time"] = json!(0);
    let request = server().post("/recipes").json(&body);
    let res = with_auth(request, &MockAuth::user(1)).await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_self_subscription() {
    let request = server().post("/users/7/subscribe");
    let res = with_auth(request, &MockAuth::user(7)).await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "SELF_SUBSCRIPTION");
}

#[tokio::test]
async fn should_reject_oversized_recipes_limit() {
    let request = server().post("/users/2/subscribe?recipes_limit=9223372036854775808");
    let res = with_auth(request, &MockAuth::user(1)).await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_invalid_registration_email() {
    let res = server()
        .post("/users")
        .json(&json!({
            "email": "not-an-email",
            "username": "chef",
            "first_name": "Anna",
            "last_name": "Petrova"
        }))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], "invalid email");
}

#[tokio::test]
async fn should_reject_malformed_recipe_list_flag() {
    let res = server().get("/recipes?is_favorited=maybe").await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

// ── Permissions ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_tag_creation_for_regular_user() {
    let request = server().post("/tags").json(&json!({
        "name": "breakfast",
        "color": "#E26C2D",
        "slug": "breakfast"
    }));
    let res = with_auth(request, &MockAuth::user(1)).await;

    res.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_forbid_ingredient_creation_for_regular_user() {
    let request = server().post("/ingredients").json(&json!({
        "name": "sugar",
        "measurement_unit": "g"
    }));
    let res = with_auth(request, &MockAuth::user(1)).await;

    res.assert_status(StatusCode::FORBIDDEN);
}
