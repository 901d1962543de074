use foodgram_api::domain::types::{MembershipFilter, RecipeFilter};
use foodgram_api::error::ApiError;
use foodgram_api::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, DescribeRecipesUseCase,
    IngredientAmountInput, ListRecipesUseCase, UpdateRecipeInput, UpdateRecipeUseCase,
};
use foodgram_domain::pagination::PageRequest;
use foodgram_domain::relation::RelationKind;

use crate::helpers::{MockStore, recipe_input};

type Create = CreateRecipeUseCase<MockStore, MockStore, MockStore, MockStore>;
type Update = UpdateRecipeUseCase<MockStore, MockStore, MockStore, MockStore>;

fn create_uc(store: &MockStore) -> Create {
    CreateRecipeUseCase {
        recipes: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
        users: store.clone(),
    }
}

fn update_uc(store: &MockStore) -> Update {
    UpdateRecipeUseCase {
        recipes: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
        users: store.clone(),
    }
}

fn delete_uc(store: &MockStore) -> DeleteRecipeUseCase<MockStore, MockStore> {
    DeleteRecipeUseCase {
        recipes: store.clone(),
        users: store.clone(),
    }
}

// ── CreateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_recipe_with_tags_and_ingredients() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let milk = store.add_ingredient("milk", "ml");

    let recipe = create_uc(&store)
        .execute(author.id, recipe_input(&[&tag], &[(&flour, 20), (&milk, 10)]))
        .await
        .unwrap();

    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.author_id, Some(author.id));
    assert_eq!(recipe.tags, vec![tag]);
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].ingredient, flour);
    assert_eq!(recipe.ingredients[0].amount, 20);
}

#[tokio::test]
async fn should_reject_empty_tags_without_storing() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let flour = store.add_ingredient("flour", "g");

    let result = create_uc(&store)
        .execute(author.id, recipe_input(&[], &[(&flour, 20)]))
        .await;

    assert!(
        matches!(result, Err(ApiError::Validation(ref m)) if m.contains("tags")),
        "expected tags validation error, got {result:?}"
    );
    assert_eq!(store.recipe_count(), 0);
}

#[tokio::test]
async fn should_reject_empty_ingredients_without_storing() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let tag = store.add_tag("breakfast", "breakfast");

    let result = create_uc(&store)
        .execute(author.id, recipe_input(&[&tag], &[]))
        .await;

    assert!(
        matches!(result, Err(ApiError::Validation(ref m)) if m.contains("ingredients")),
        "expected ingredients validation error, got {result:?}"
    );
    assert_eq!(store.recipe_count(), 0);
}

#[tokio::test]
async fn should_reject_unknown_tag_ids() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let flour = store.add_ingredient("flour", "g");

    let input = CreateRecipeInput {
        tags: vec![404],
        ..recipe_input(&[], &[(&flour, 20)])
    };
    let result = create_uc(&store).execute(author.id, input).await;

    assert!(
        matches!(result, Err(ApiError::Validation(ref m)) if m == "unknown tag ids: 404"),
        "expected unknown tag error, got {result:?}"
    );
    assert_eq!(store.recipe_count(), 0);
}

#[tokio::test]
async fn should_reject_amount_outside_range() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");

    let result = create_uc(&store)
        .execute(author.id, recipe_input(&[&tag], &[(&flour, 31)]))
        .await;

    assert!(
        matches!(result, Err(ApiError::Validation(ref m)) if m.contains("amount")),
        "expected amount validation error, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_second_recipe_with_same_name_by_same_author() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let uc = create_uc(&store);

    uc.execute(author.id, recipe_input(&[&tag], &[(&flour, 20)]))
        .await
        .unwrap();
    let result = uc
        .execute(author.id, recipe_input(&[&tag], &[(&flour, 20)]))
        .await;

    assert!(
        matches!(result, Err(ApiError::RecipeAlreadyExists)),
        "expected RecipeAlreadyExists, got {result:?}"
    );
    assert_eq!(store.recipe_count(), 1);
}

#[tokio::test]
async fn should_forbid_creation_by_disabled_author() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    store.deactivate(author.id);
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");

    let result = create_uc(&store)
        .execute(author.id, recipe_input(&[&tag], &[(&flour, 20)]))
        .await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.recipe_count(), 0);
}

#[tokio::test]
async fn should_forbid_creation_for_identity_without_account() {
    let store = MockStore::new();
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");

    let result = create_uc(&store)
        .execute(777, recipe_input(&[&tag], &[(&flour, 20)]))
        .await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.recipe_count(), 0);
}

// ── UpdateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_ingredients_when_only_name_changes() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let id = store.add_recipe(&author, "Pancakes", &[&tag], &[(&flour, 20)]);
    let before = store.stored_recipe(id).unwrap();

    let recipe = update_uc(&store)
        .execute(
            author.id,
            false,
            id,
            UpdateRecipeInput {
                name: Some("  Crepes ".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(recipe.name, "Crepes");
    let after = store.stored_recipe(id).unwrap();
    assert_eq!(after.ingredients, before.ingredients);
    assert_eq!(after.tag_ids, before.tag_ids);
    assert_eq!(after.cooking_time, before.cooking_time);
}

#[tokio::test]
async fn should_replace_ingredients_when_supplied() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let eggs = store.add_ingredient("eggs", "pcs");
    let id = store.add_recipe(&author, "Pancakes", &[&tag], &[(&flour, 20)]);

    let recipe = update_uc(&store)
        .execute(
            author.id,
            false,
            id,
            UpdateRecipeInput {
                ingredients: Some(vec![IngredientAmountInput {
                    id: eggs.id,
                    amount: 2,
                }]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].ingredient, eggs);
    assert_eq!(recipe.ingredients[0].amount, 2);
}

#[tokio::test]
async fn should_forbid_update_by_other_user() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let other = store.add_user("other", "Ivan");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let id = store.add_recipe(&author, "Pancakes", &[&tag], &[(&flour, 20)]);

    let result = update_uc(&store)
        .execute(
            other.id,
            false,
            id,
            UpdateRecipeInput {
                name: Some("Mine now".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.stored_recipe(id).unwrap().name, "Pancakes");
}

#[tokio::test]
async fn should_allow_staff_to_update_any_recipe() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let admin = store.add_user("admin", "Olga");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let id = store.add_recipe(&author, "Pancakes", &[&tag], &[(&flour, 20)]);

    let recipe = update_uc(&store)
        .execute(
            admin.id,
            true,
            id,
            UpdateRecipeInput {
                cooking_time: Some(45),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(recipe.cooking_time, 45);
}

#[tokio::test]
async fn should_return_not_found_before_permission_check_on_update() {
    let store = MockStore::new();
    let user = store.add_user("chef", "Anna");

    let result = update_uc(&store)
        .execute(user.id, false, 9999, UpdateRecipeInput::default())
        .await;

    assert!(
        matches!(result, Err(ApiError::RecipeNotFound)),
        "expected RecipeNotFound, got {result:?}"
    );
}

// ── DeleteRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_own_recipe_and_drop_its_relations() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let reader = store.add_user("reader", "Ivan");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let id = store.add_recipe(&author, "Pancakes", &[&tag], &[(&flour, 20)]);
    store.relate(RelationKind::Favorite, reader.id, id);

    delete_uc(&store)
        .execute(author.id, false, id)
        .await
        .unwrap();

    assert_eq!(store.recipe_count(), 0);
    assert_eq!(store.relation_count(RelationKind::Favorite, reader.id, id), 0);
}

#[tokio::test]
async fn should_forbid_delete_by_other_user() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let other = store.add_user("other", "Ivan");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let id = store.add_recipe(&author, "Pancakes", &[&tag], &[(&flour, 20)]);

    let result = delete_uc(&store).execute(other.id, false, id).await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.recipe_count(), 1);
}

#[tokio::test]
async fn should_forbid_delete_by_disabled_author() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let tag = store.add_tag("breakfast", "breakfast");
    let flour = store.add_ingredient("flour", "g");
    let id = store.add_recipe(&author, "Pancakes", &[&tag], &[(&flour, 20)]);
    store.deactivate(author.id);

    let result = delete_uc(&store).execute(author.id, false, id).await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.recipe_count(), 1);
}

// ── ListRecipesUseCase / DescribeRecipesUseCase ──────────────────────────────

#[tokio::test]
async fn should_filter_by_any_of_the_given_tags_newest_first() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let breakfast = store.add_tag("breakfast", "breakfast");
    let lunch = store.add_tag("lunch", "lunch");
    let dinner = store.add_tag("dinner", "dinner");
    let salt = store.add_ingredient("salt", "g");
    let porridge = store.add_recipe(&author, "Porridge", &[&breakfast], &[(&salt, 1)]);
    store.add_recipe(&author, "Steak", &[&dinner], &[(&salt, 1)]);
    let salad = store.add_recipe(&author, "Salad", &[&lunch, &dinner], &[(&salt, 1)]);

    let filter = RecipeFilter {
        tags: vec!["breakfast".to_owned(), "lunch".to_owned()],
        ..Default::default()
    };
    let page = ListRecipesUseCase {
        recipes: store.clone(),
    }
    .execute(&filter, PageRequest::default())
    .await
    .unwrap();

    let ids: Vec<i32> = page.results.iter().map(|r| r.id).collect();
    assert_eq!(page.count, 2);
    assert_eq!(ids, vec![salad, porridge]);
}

#[tokio::test]
async fn should_filter_by_favorites_of_viewer() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let reader = store.add_user("reader", "Ivan");
    let tag = store.add_tag("breakfast", "breakfast");
    let salt = store.add_ingredient("salt", "g");
    let liked = store.add_recipe(&author, "Porridge", &[&tag], &[(&salt, 1)]);
    store.add_recipe(&author, "Omelette", &[&tag], &[(&salt, 1)]);
    store.relate(RelationKind::Favorite, reader.id, liked);

    let filter = RecipeFilter {
        favorited: Some(MembershipFilter {
            user_id: reader.id,
            member: true,
        }),
        ..Default::default()
    };
    let page = ListRecipesUseCase {
        recipes: store.clone(),
    }
    .execute(&filter, PageRequest::default())
    .await
    .unwrap();

    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].id, liked);
}

#[tokio::test]
async fn should_exclude_cart_recipes_when_flag_is_false() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let reader = store.add_user("reader", "Ivan");
    let tag = store.add_tag("breakfast", "breakfast");
    let salt = store.add_ingredient("salt", "g");
    let carted = store.add_recipe(&author, "Porridge", &[&tag], &[(&salt, 1)]);
    let other = store.add_recipe(&author, "Omelette", &[&tag], &[(&salt, 1)]);
    store.relate(RelationKind::Cart, reader.id, carted);

    let filter = RecipeFilter {
        in_cart: Some(MembershipFilter {
            user_id: reader.id,
            member: false,
        }),
        ..Default::default()
    };
    let page = ListRecipesUseCase {
        recipes: store.clone(),
    }
    .execute(&filter, PageRequest::default())
    .await
    .unwrap();

    let ids: Vec<i32> = page.results.iter().map(|r| r.id).collect();
    assert_eq!(page.count, 1);
    assert_eq!(ids, vec![other]);
}

#[tokio::test]
async fn should_paginate_recipe_list() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let tag = store.add_tag("breakfast", "breakfast");
    let salt = store.add_ingredient("salt", "g");
    for name in ["A", "B", "C", "D", "E"] {
        store.add_recipe(&author, name, &[&tag], &[(&salt, 1)]);
    }

    let page = ListRecipesUseCase {
        recipes: store.clone(),
    }
    .execute(&RecipeFilter::default(), PageRequest { limit: 2, page: 3 })
    .await
    .unwrap();

    assert_eq!(page.count, 5);
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "A");
}

#[tokio::test]
async fn should_decorate_recipes_with_viewer_flags() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let reader = store.add_user("reader", "Ivan");
    let tag = store.add_tag("breakfast", "breakfast");
    let salt = store.add_ingredient("salt", "g");
    let id = store.add_recipe(&author, "Porridge", &[&tag], &[(&salt, 1)]);
    store.relate(RelationKind::Favorite, reader.id, id);
    store.relate(RelationKind::Subscription, reader.id, author.id);

    let recipes = ListRecipesUseCase {
        recipes: store.clone(),
    }
    .execute(&RecipeFilter::default(), PageRequest::default())
    .await
    .unwrap()
    .results;
    let uc = DescribeRecipesUseCase {
        users: store.clone(),
        relations: store.clone(),
    };

    let views = uc.execute(Some(reader.id), recipes.clone()).await.unwrap();
    assert!(views[0].is_favorited);
    assert!(!views[0].is_in_shopping_cart);
    let author_view = views[0].author.as_ref().unwrap();
    assert_eq!(author_view.user.id, author.id);
    assert!(author_view.is_subscribed);

    let anonymous = uc.execute(None, recipes).await.unwrap();
    assert!(!anonymous[0].is_favorited);
    assert!(!anonymous[0].author.as_ref().unwrap().is_subscribed);
}
