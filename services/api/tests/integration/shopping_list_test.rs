use chrono::{TimeZone, Utc};

use foodgram_api::error::ApiError;
use foodgram_api::usecase::shopping_list::DownloadShoppingListUseCase;
use foodgram_domain::relation::RelationKind;

use crate::helpers::MockStore;

fn uc(store: &MockStore) -> DownloadShoppingListUseCase<MockStore, MockStore> {
    DownloadShoppingListUseCase {
        users: store.clone(),
        carts: store.clone(),
    }
}

#[tokio::test]
async fn should_sum_ingredient_shared_by_two_cart_recipes() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let buyer = store.add_user("buyer", "Ivan");
    let tag = store.add_tag("dessert", "dessert");
    let sugar = store.add_ingredient("sugar", "g");
    let flour = store.add_ingredient("flour", "g");
    let cake = store.add_recipe(&author, "Cake", &[&tag], &[(&sugar, 25), (&flour, 30)]);
    let jam = store.add_recipe(&author, "Jam", &[&tag], &[(&sugar, 20)]);
    // Same ingredient listed by another recipe not in the cart.
    store.add_recipe(&author, "Tea", &[&tag], &[(&sugar, 5)]);
    store.relate(RelationKind::Cart, buyer.id, cake);
    store.relate(RelationKind::Cart, buyer.id, jam);
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap();

    let list = uc(&store).execute(buyer.id, now).await.unwrap();

    assert_eq!(list.filename, "buyer_shopping_list.txt");
    assert_eq!(
        list.body,
        "Shopping list for:\n\nIvan\n01/05/2024 18:30\n\nflour: 30 g\nsugar: 45 g\n\nCompiled with Foodgram"
    );
}

#[tokio::test]
async fn should_render_single_line_for_100_plus_50_sugar() {
    let store = MockStore::new();
    let author = store.add_user("chef", "Anna");
    let tag = store.add_tag("dessert", "dessert");
    let sugar = store.add_ingredient("sugar", "g");
    let a = store.add_recipe(&author, "Syrup", &[&tag], &[(&sugar, 100)]);
    let b = store.add_recipe(&author, "Caramel", &[&tag], &[(&sugar, 50)]);
    store.relate(RelationKind::Cart, author.id, a);
    store.relate(RelationKind::Cart, author.id, b);

    let list = uc(&store).execute(author.id, Utc::now()).await.unwrap();

    let lines: Vec<&str> = list
        .body
        .lines()
        .filter(|l| l.starts_with("sugar"))
        .collect();
    assert_eq!(lines, vec!["sugar: 150 g"]);
}

#[tokio::test]
async fn should_render_header_and_footer_for_empty_cart() {
    let store = MockStore::new();
    let user = store.add_user("chef", "Anna");
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap();

    let list = uc(&store).execute(user.id, now).await.unwrap();

    assert_eq!(
        list.body,
        "Shopping list for:\n\nAnna\n02/01/2024 03:04\n\n\nCompiled with Foodgram"
    );
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_user() {
    let store = MockStore::new();

    let result = uc(&store).execute(42, Utc::now()).await;

    assert!(
        matches!(result, Err(ApiError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
