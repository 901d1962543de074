use foodgram_api::domain::types::RelationTargetView;
use foodgram_api::error::ApiError;
use foodgram_api::usecase::relation::{CreateRelationUseCase, DeleteRelationUseCase};
use foodgram_domain::relation::RelationKind;

use crate::helpers::MockStore;

fn create_uc(store: &MockStore) -> CreateRelationUseCase<MockStore, MockStore, MockStore> {
    CreateRelationUseCase {
        relations: store.clone(),
        recipes: store.clone(),
        users: store.clone(),
    }
}

fn delete_uc(store: &MockStore) -> DeleteRelationUseCase<MockStore, MockStore, MockStore> {
    DeleteRelationUseCase {
        relations: store.clone(),
        recipes: store.clone(),
        users: store.clone(),
    }
}

fn seeded() -> (MockStore, i32, i32) {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let reader = store.add_user("reader", "Ivan");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let recipe = store.add_recipe(&author, "Pancakes", &[&tag], &[(&flour, 20)]);
    (store, reader.id, recipe)
}

// ── CreateRelationUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_short_recipe_when_favoriting() {
    let (store, reader, recipe) = seeded();

    let view = create_uc(&store)
        .execute(RelationKind::Favorite, reader, recipe, None)
        .await
        .unwrap();

    match view {
        RelationTargetView::Recipe(short) => {
            assert_eq!(short.id, recipe);
            assert_eq!(short.name, "Pancakes");
        }
        other => panic!("expected recipe view, got {other:?}"),
    }
    assert_eq!(store.relation_count(RelationKind::Favorite, reader, recipe), 1);
}

#[tokio::test]
async fn should_reject_duplicate_favorite_and_keep_one_row() {
    let (store, reader, recipe) = seeded();
    let uc = create_uc(&store);

    uc.execute(RelationKind::Favorite, reader, recipe, None)
        .await
        .unwrap();
    let result = uc.execute(RelationKind::Favorite, reader, recipe, None).await;

    assert!(
        matches!(result, Err(ApiError::AlreadyPerformed)),
        "expected AlreadyPerformed, got {result:?}"
    );
    assert_eq!(store.relation_count(RelationKind::Favorite, reader, recipe), 1);
}

#[tokio::test]
async fn should_keep_favorites_and_cart_independent() {
    let (store, reader, recipe) = seeded();
    let uc = create_uc(&store);

    uc.execute(RelationKind::Favorite, reader, recipe, None)
        .await
        .unwrap();
    uc.execute(RelationKind::Cart, reader, recipe, None)
        .await
        .unwrap();

    assert_eq!(store.relation_count(RelationKind::Favorite, reader, recipe), 1);
    assert_eq!(store.relation_count(RelationKind::Cart, reader, recipe), 1);
}

#[tokio::test]
async fn should_return_recipe_not_found_for_unknown_recipe() {
    let (store, reader, _) = seeded();

    let result = create_uc(&store)
        .execute(RelationKind::Cart, reader, 9999, None)
        .await;

    assert!(
        matches!(result, Err(ApiError::RecipeNotFound)),
        "expected RecipeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_self_subscription_without_storing_row() {
    let (store, reader, _) = seeded();

    let result = create_uc(&store)
        .execute(RelationKind::Subscription, reader, reader, None)
        .await;

    assert!(
        matches!(result, Err(ApiError::SelfSubscription)),
        "expected SelfSubscription, got {result:?}"
    );
    assert_eq!(
        store.relation_count(RelationKind::Subscription, reader, reader),
        0
    );
}

#[tokio::test]
async fn should_return_author_not_found_for_unknown_author() {
    let (store, reader, _) = seeded();

    let result = create_uc(&store)
        .execute(RelationKind::Subscription, reader, 9999, None)
        .await;

    assert!(
        matches!(result, Err(ApiError::AuthorNotFound)),
        "expected AuthorNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_forbid_relations_for_disabled_account() {
    let (store, reader, recipe) = seeded();
    store.deactivate(reader);

    let result = create_uc(&store)
        .execute(RelationKind::Favorite, reader, recipe, None)
        .await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.relation_count(RelationKind::Favorite, reader, recipe), 0);
}

#[tokio::test]
async fn should_embed_limited_recipes_when_subscribing() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let reader = store.add_user("reader", "Ivan");
    let tag = store.add_tag("dinner", "dinner");
    let salt = store.add_ingredient("salt", "g");
    store.add_recipe(&author, "Soup", &[&tag], &[(&salt, 1)]);
    store.add_recipe(&author, "Stew", &[&tag], &[(&salt, 2)]);
    let newest = store.add_recipe(&author, "Pie", &[&tag], &[(&salt, 3)]);

    let view = create_uc(&store)
        .execute(RelationKind::Subscription, reader.id, author.id, Some(2))
        .await
        .unwrap();

    match view {
        RelationTargetView::Author(subscribed) => {
            assert_eq!(subscribed.author.id, author.id);
            assert_eq!(subscribed.recipes.len(), 2);
            assert_eq!(subscribed.recipes[0].id, newest);
            assert_eq!(subscribed.recipes_count, 3);
        }
        other => panic!("expected author view, got {other:?}"),
    }
}

// ── DeleteRelationUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_remove_existing_favorite() {
    let (store, reader, recipe) = seeded();
    store.relate(RelationKind::Favorite, reader, recipe);

    delete_uc(&store)
        .execute(RelationKind::Favorite, reader, recipe)
        .await
        .unwrap();

    assert_eq!(store.relation_count(RelationKind::Favorite, reader, recipe), 0);
}

#[tokio::test]
async fn should_keep_cart_entry_when_disabled_account_removes_it() {
    let (store, reader, recipe) = seeded();
    store.relate(RelationKind::Cart, reader, recipe);
    store.deactivate(reader);

    let result = delete_uc(&store)
        .execute(RelationKind::Cart, reader, recipe)
        .await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.relation_count(RelationKind::Cart, reader, recipe), 1);
}

#[tokio::test]
async fn should_reject_removing_favorite_never_added() {
    let (store, reader, recipe) = seeded();

    let result = delete_uc(&store)
        .execute(RelationKind::Favorite, reader, recipe)
        .await;

    assert!(
        matches!(result, Err(ApiError::RelationMissing(RelationKind::Favorite))),
        "expected RelationMissing(Favorite), got {result:?}"
    );
}

#[tokio::test]
async fn should_check_recipe_existence_before_membership_on_delete() {
    let (store, reader, _) = seeded();

    let result = delete_uc(&store)
        .execute(RelationKind::Cart, reader, 9999)
        .await;

    assert!(
        matches!(result, Err(ApiError::RecipeNotFound)),
        "expected RecipeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_unsubscribe_after_subscribing() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let reader = store.add_user("reader", "Ivan");

    create_uc(&store)
        .execute(RelationKind::Subscription, reader.id, author.id, None)
        .await
        .unwrap();
    delete_uc(&store)
        .execute(RelationKind::Subscription, reader.id, author.id)
        .await
        .unwrap();

    assert_eq!(
        store.relation_count(RelationKind::Subscription, reader.id, author.id),
        0
    );
}
