//! Migration: Create activation logs table
//!
//! Append-only; the application never updates or deletes rows here.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivationLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivationLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivationLogs::TerminalId).uuid().not_null())
                    .col(ColumnDef::new(ActivationLogs::Action).string().not_null())
                    .col(
                        ColumnDef::new(ActivationLogs::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActivationLogs::PerformedBy).uuid().null())
                    .col(ColumnDef::new(ActivationLogs::Data).json_binary().null())
                    .col(
                        ColumnDef::new(ActivationLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activation_logs_terminal_id")
                            .from(ActivationLogs::Table, ActivationLogs::TerminalId)
                            .to(Terminals::Table, Terminals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activation_logs_terminal_id")
                    .table(ActivationLogs::Table)
                    .col(ActivationLogs::TerminalId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivationLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ActivationLogs {
    Table,
    Id,
    TerminalId,
    Action,
    Description,
    PerformedBy,
    Data,
    CreatedAt,
}

#[derive(Iden)]
enum Terminals {
    Table,
    Id,
}
