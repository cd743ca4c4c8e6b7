use sea_orm::entity::prelude::*;

/// Parking slot held by a resident profile
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_parkings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_info_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub parking_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_info::Entity",
        from = "Column::UserInfoId",
        to = "super::user_info::Column::Id",
        on_delete = "Cascade"
    )]
    UserInfo,
    #[sea_orm(
        belongs_to = "super::parking::Entity",
        from = "Column::ParkingId",
        to = "super::parking::Column::Id",
        on_delete = "Cascade"
    )]
    Parking,
}

impl Related<super::user_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserInfo.def()
    }
}

impl Related<super::parking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
