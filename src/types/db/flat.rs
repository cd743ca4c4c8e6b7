use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "flats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub flat_number: String,
    pub wing: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_flat::Entity")]
    UserFlat,
}

impl Related<super::user_flat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFlat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
