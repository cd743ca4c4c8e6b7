use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::IsAuthorised).boolean().not_null().default(true))
                    .col(ColumnDef::new(Users::LastLogon).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // One profile per user, enforced by the unique user_id
        manager
            .create_table(
                Table::create()
                    .table(UserInfo::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserInfo::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(UserInfo::UserId).integer().not_null().unique_key())
                    .col(ColumnDef::new(UserInfo::PrimFirstName).string().not_null())
                    .col(ColumnDef::new(UserInfo::PrimMiddleName).string().null())
                    .col(ColumnDef::new(UserInfo::PrimLastName).string().not_null())
                    .col(ColumnDef::new(UserInfo::SecFirstName).string().null())
                    .col(ColumnDef::new(UserInfo::SecMiddleName).string().null())
                    .col(ColumnDef::new(UserInfo::SecLastName).string().null())
                    .col(ColumnDef::new(UserInfo::EmailId).string().null())
                    .col(ColumnDef::new(UserInfo::AlterEmailId).string().null())
                    .col(ColumnDef::new(UserInfo::PrimaryMobile).string().null())
                    .col(ColumnDef::new(UserInfo::SecondaryMobile).string().null())
                    .col(ColumnDef::new(UserInfo::CorrespondenceAddress).string().null())
                    .col(ColumnDef::new(UserInfo::IsBoardMember).boolean().not_null().default(false))
                    .col(ColumnDef::new(UserInfo::IsSecondaryOwner).boolean().not_null().default(false))
                    .col(ColumnDef::new(UserInfo::Version).integer().not_null().default(0))
                    .col(ColumnDef::new(UserInfo::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_info_user_id")
                            .from(UserInfo::Table, UserInfo::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoles::UserId).integer().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserRoles::UserId)
                            .col(UserRoles::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_user_id")
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_role_id")
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Amenities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Amenities::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Amenities::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Amenities::Description).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AmenityBookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AmenityBookings::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(AmenityBookings::UserId).integer().not_null())
                    .col(ColumnDef::new(AmenityBookings::AmenityId).integer().not_null())
                    .col(ColumnDef::new(AmenityBookings::StartTime).big_integer().not_null())
                    .col(ColumnDef::new(AmenityBookings::EndTime).big_integer().not_null())
                    .col(ColumnDef::new(AmenityBookings::Purpose).string().null())
                    .col(ColumnDef::new(AmenityBookings::Status).string().not_null())
                    .col(ColumnDef::new(AmenityBookings::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amenity_bookings_user_id")
                            .from(AmenityBookings::Table, AmenityBookings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amenity_bookings_amenity_id")
                            .from(AmenityBookings::Table, AmenityBookings::AmenityId)
                            .to(Amenities::Table, Amenities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_amenity_bookings_user_id")
                    .table(AmenityBookings::Table)
                    .col(AmenityBookings::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AmenityBookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Amenities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserInfo::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    IsAuthorised,
    LastLogon,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserInfo {
    Table,
    Id,
    UserId,
    PrimFirstName,
    PrimMiddleName,
    PrimLastName,
    SecFirstName,
    SecMiddleName,
    SecLastName,
    EmailId,
    AlterEmailId,
    PrimaryMobile,
    SecondaryMobile,
    CorrespondenceAddress,
    IsBoardMember,
    IsSecondaryOwner,
    Version,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum UserRoles {
    Table,
    UserId,
    RoleId,
}

#[derive(DeriveIden)]
enum Amenities {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum AmenityBookings {
    Table,
    Id,
    UserId,
    AmenityId,
    StartTime,
    EndTime,
    Purpose,
    Status,
    CreatedAt,
}
