//! Migration: Create ports table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ports::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ports::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Ports::PortName).string().not_null())
                    .col(ColumnDef::new(Ports::DisplayName).string().null())
                    .col(ColumnDef::new(Ports::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Ports::Country).string().null())
                    .col(ColumnDef::new(Ports::State).string().null())
                    .col(
                        ColumnDef::new(Ports::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Ports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Ports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ports_organization_id")
                            .from(Ports::Table, Ports::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ports_organization_id")
                    .table(Ports::Table)
                    .col(Ports::OrganizationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Ports {
    Table,
    Id,
    PortName,
    DisplayName,
    OrganizationId,
    Country,
    State,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
}
