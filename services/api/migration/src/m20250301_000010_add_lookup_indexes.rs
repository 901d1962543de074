use sea_orm_migration::prelude::*;

/// Reverse-lookup indexes for foreign keys that are not the leading primary-key column.
const INDEXES: [(&str, &str, &str); 6] = [
    ("idx_recipes_author_id", "recipes", "author_id"),
    ("idx_recipe_tags_tag_id", "recipe_tags", "tag_id"),
    (
        "idx_amount_ingredients_ingredient_id",
        "amount_ingredients",
        "ingredient_id",
    ),
    ("idx_favorites_recipe_id", "favorites", "recipe_id"),
    ("idx_carts_recipe_id", "carts", "recipe_id"),
    ("idx_subscriptions_author_id", "subscriptions", "author_id"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .table(Alias::new(table))
                        .col(Alias::new(column))
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _, _) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).to_owned())
                .await?;
        }
        Ok(())
    }
}
