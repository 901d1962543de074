use foodgram_api::error::ApiError;
use foodgram_api::usecase::ingredient::{
    CreateIngredientInput, CreateIngredientUseCase, SearchIngredientsUseCase,
};

use crate::helpers::MockStore;

fn pantry() -> MockStore {
    let store = MockStore::new();
    for (name, unit) in [
        ("almond milk", "ml"),
        ("milk", "ml"),
        ("coconut milk", "ml"),
        ("milk chocolate", "g"),
        ("flour", "g"),
    ] {
        store.add_ingredient(name, unit);
    }
    store
}

#[tokio::test]
async fn should_rank_prefix_matches_before_substring_matches() {
    let store = pantry();
    let uc = SearchIngredientsUseCase {
        ingredients: store.clone(),
    };

    let found = uc.execute(Some("  MILK ")).await.unwrap();

    let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["milk", "milk chocolate", "almond milk", "coconut milk"]
    );
}

#[tokio::test]
async fn should_list_whole_catalog_for_blank_search() {
    let store = pantry();
    let uc = SearchIngredientsUseCase {
        ingredients: store.clone(),
    };

    assert_eq!(uc.execute(None).await.unwrap().len(), 5);
    assert_eq!(uc.execute(Some("   ")).await.unwrap().len(), 5);
}

#[tokio::test]
async fn should_create_ingredient_as_staff_and_reject_duplicate() {
    let store = MockStore::new();
    let admin = store.add_user("admin", "Olga");
    let uc = CreateIngredientUseCase {
        ingredients: store.clone(),
        users: store.clone(),
    };
    let input = || CreateIngredientInput {
        name: "Sugar".to_owned(),
        measurement_unit: "G".to_owned(),
    };

    let created = uc.execute(admin.id, true, input()).await.unwrap();
    assert_eq!(created.name, "sugar");
    assert_eq!(created.measurement_unit, "g");

    let result = uc.execute(admin.id, true, input()).await;
    assert!(
        matches!(result, Err(ApiError::IngredientAlreadyExists)),
        "expected IngredientAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_forbid_ingredient_creation_for_regular_user() {
    let store = MockStore::new();
    let user = store.add_user("chef", "Anna");
    let uc = CreateIngredientUseCase {
        ingredients: store.clone(),
        users: store.clone(),
    };

    let result = uc
        .execute(
            user.id,
            false,
            CreateIngredientInput {
                name: "salt".to_owned(),
                measurement_unit: "g".to_owned(),
            },
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_forbid_ingredient_creation_for_disabled_staff() {
    let store = MockStore::new();
    let admin = store.add_user("admin", "Olga");
    store.deactivate(admin.id);
    let uc = SearchIngredientsUseCase {
        ingredients: store.clone(),
    };

    let result = CreateIngredientUseCase {
        ingredients: store.clone(),
        users: store.clone(),
    }
    .execute(
        admin.id,
        true,
        CreateIngredientInput {
            name: "salt".to_owned(),
            measurement_unit: "g".to_owned(),
        },
    )
    .await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert!(uc.execute(None).await.unwrap().is_empty());
}
