use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,

    pub prim_first_name: String,
    pub prim_middle_name: Option<String>,
    pub prim_last_name: String,

    // Secondary (co-)owner of the flat
    pub sec_first_name: Option<String>,
    pub sec_middle_name: Option<String>,
    pub sec_last_name: Option<String>,

    pub email_id: Option<String>,
    pub alter_email_id: Option<String>,
    pub primary_mobile: Option<String>,
    pub secondary_mobile: Option<String>,
    pub correspondence_address: Option<String>,

    pub is_board_member: bool,
    pub is_secondary_owner: bool,

    /// Optimistic concurrency counter, bumped on every successful update
    pub version: i32,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
