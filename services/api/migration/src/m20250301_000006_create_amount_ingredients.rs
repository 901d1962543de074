use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AmountIngredients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AmountIngredients::RecipeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AmountIngredients::IngredientId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AmountIngredients::Amount)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(AmountIngredients::Amount).between(1, 30)),
                    )
                    .primary_key(
                        Index::create()
                            .col(AmountIngredients::RecipeId)
                            .col(AmountIngredients::IngredientId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AmountIngredients::Table, AmountIngredients::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AmountIngredients::Table, AmountIngredients::IngredientId)
                            .to(Ingredients::Table, Ingredients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AmountIngredients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AmountIngredients {
    Table,
    RecipeId,
    IngredientId,
    Amount,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}

#[derive(Iden)]
enum Ingredients {
    Table,
    Id,
}
