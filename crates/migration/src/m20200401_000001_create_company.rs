//! Create `company` table.
//!
//! `name` carries the UNIQUE constraint that makes concurrent creates safe.
//! `status` has no column default; the configured default is applied on insert.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_auto(Company::Id))
                    .col(string_len(Company::Name, 128).unique_key().not_null())
                    .col(string_len(Company::Status, 32).not_null())
                    .col(text(Company::Notes).not_null().default(""))
                    .col(string_len(Company::ApplicationLink, 512).not_null().default(""))
                    .col(timestamp_with_time_zone(Company::LastUpdate).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Company { Table, Id, Name, Status, Notes, ApplicationLink, LastUpdate }
