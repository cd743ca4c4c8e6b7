use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "amenities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::amenity_booking::Entity")]
    AmenityBooking,
}

impl Related<super::amenity_booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AmenityBooking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
