//! Create reservations table
//!
//! Indexed for the lookups the reservation core performs:
//! item history by start, booker by status, owner by start.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_items::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::ItemId).integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::ItemOwnerId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::BookerId).integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("WAITING"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_item")
                            .from(Reservations::Table, Reservations::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_booker")
                            .from(Reservations::Table, Reservations::BookerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_item_start")
                    .table(Reservations::Table)
                    .col(Reservations::ItemId)
                    .col(Reservations::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_booker_status")
                    .table(Reservations::Table)
                    .col(Reservations::BookerId)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_owner_start")
                    .table(Reservations::Table)
                    .col(Reservations::ItemOwnerId)
                    .col(Reservations::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    ItemId,
    ItemOwnerId,
    BookerId,
    StartDate,
    EndDate,
    Status,
}
