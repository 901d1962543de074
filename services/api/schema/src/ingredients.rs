use sea_orm::entity::prelude::*;

/// Ingredient with its measurement unit. `(name, measurement_unit)` is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::amount_ingredients::Entity")]
    AmountIngredients,
}

impl Related<super::amount_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AmountIngredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
