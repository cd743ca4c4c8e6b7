use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parkings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slot_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_parking::Entity")]
    UserParking,
}

impl Related<super::user_parking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserParking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
