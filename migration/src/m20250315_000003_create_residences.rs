use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Flats::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Flats::FlatNumber).string().not_null().unique_key())
                    .col(ColumnDef::new(Flats::Wing).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parkings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Parkings::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Parkings::SlotNumber).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserFlats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserFlats::UserInfoId).integer().not_null())
                    .col(ColumnDef::new(UserFlats::FlatId).integer().not_null())
                    .primary_key(Index::create().col(UserFlats::UserInfoId).col(UserFlats::FlatId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_flats_user_info_id")
                            .from(UserFlats::Table, UserFlats::UserInfoId)
                            .to(UserInfo::Table, UserInfo::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_flats_flat_id")
                            .from(UserFlats::Table, UserFlats::FlatId)
                            .to(Flats::Table, Flats::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserParkings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserParkings::UserInfoId).integer().not_null())
                    .col(ColumnDef::new(UserParkings::ParkingId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserParkings::UserInfoId)
                            .col(UserParkings::ParkingId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_parkings_user_info_id")
                            .from(UserParkings::Table, UserParkings::UserInfoId)
                            .to(UserInfo::Table, UserInfo::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_parkings_parking_id")
                            .from(UserParkings::Table, UserParkings::ParkingId)
                            .to(Parkings::Table, Parkings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserParkings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserFlats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parkings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Flats::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum UserInfo {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Flats {
    Table,
    Id,
    FlatNumber,
    Wing,
}

#[derive(DeriveIden)]
enum Parkings {
    Table,
    Id,
    SlotNumber,
}

#[derive(DeriveIden)]
enum UserFlats {
    Table,
    UserInfoId,
    FlatId,
}

#[derive(DeriveIden)]
enum UserParkings {
    Table,
    UserInfoId,
    ParkingId,
}
