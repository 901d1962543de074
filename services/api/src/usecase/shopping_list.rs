use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::repository::{ShoppingCartRepository, UserRepository};
use crate::domain::types::{CartIngredient, ShoppingList, ShoppingListItem};
use crate::error::ApiError;

/// Sum cart lines per (name, unit), ordered by name then unit.
pub fn aggregate(lines: impl IntoIterator<Item = CartIngredient>) -> Vec<ShoppingListItem> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *totals
            .entry((line.name, line.measurement_unit))
            .or_default() += line.amount;
    }
    totals
        .into_iter()
        .map(|((name, measurement_unit), amount)| ShoppingListItem {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}

/// Render the plain-text shopping list.
pub fn render(first_name: &str, now: DateTime<Utc>, items: &[ShoppingListItem]) -> String {
    let mut out = format!(
        "Shopping list for:\n\n{first_name}\n{}\n\n",
        now.format("%d/%m/%Y %H:%M")
    );
    for item in items {
        out.push_str(&format!(
            "{}: {} {}\n",
            item.name, item.amount, item.measurement_unit
        ));
    }
    out.push_str("\nCompiled with Foodgram");
    out
}

pub fn filename(username: &str) -> String {
    format!("{username}_shopping_list.txt")
}

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<U: UserRepository, C: ShoppingCartRepository> {
    pub users: U,
    pub carts: C,
}

impl<U: UserRepository, C: ShoppingCartRepository> DownloadShoppingListUseCase<U, C> {
    pub async fn execute(&self, user_id: i32, now: DateTime<Utc>) -> Result<ShoppingList, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let items = aggregate(self.carts.cart_ingredients(user_id).await?);
        Ok(ShoppingList {
            filename: filename(&user.username),
            body: render(&user.first_name, now, &items),
        })
    }
}
