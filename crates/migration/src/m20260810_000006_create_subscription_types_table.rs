//! Migration: Create subscription types table
//!
//! Fixed lookup seeded with 1/12/24/48 month plans by `seeds::run_all_seeds`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubscriptionTypes::Name).string().not_null())
                    .col(
                        ColumnDef::new(SubscriptionTypes::Months)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubscriptionTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SubscriptionTypes {
    Table,
    Id,
    Name,
    Months,
}
