//! Migration: Create terminals table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Terminals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Terminals::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Terminals::PortId).uuid().not_null())
                    .col(ColumnDef::new(Terminals::TerminalName).string().not_null())
                    .col(ColumnDef::new(Terminals::ShortCode).string().null())
                    .col(
                        ColumnDef::new(Terminals::Status)
                            .string_len(32)
                            .not_null()
                            .default("Processing for activation"),
                    )
                    .col(
                        ColumnDef::new(Terminals::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Terminals::SubscriptionTypeId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Terminals::ActivationStartDate)
                            .date()
                            .null(),
                    )
                    .col(ColumnDef::new(Terminals::ActivationEndDate).date().null())
                    .col(ColumnDef::new(Terminals::WorkOrderNo).string().null())
                    .col(ColumnDef::new(Terminals::WorkOrderDate).date().null())
                    .col(ColumnDef::new(Terminals::TaxId).string().null())
                    .col(ColumnDef::new(Terminals::Currency).string().null())
                    .col(ColumnDef::new(Terminals::Timezone).string().null())
                    .col(ColumnDef::new(Terminals::BillingAddress).string().null())
                    .col(ColumnDef::new(Terminals::BillingCity).string().null())
                    .col(ColumnDef::new(Terminals::BillingCountry).string().null())
                    .col(ColumnDef::new(Terminals::ShippingAddress).string().null())
                    .col(ColumnDef::new(Terminals::ShippingCity).string().null())
                    .col(ColumnDef::new(Terminals::ShippingCountry).string().null())
                    .col(ColumnDef::new(Terminals::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Terminals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Terminals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_terminals_port_id")
                            .from(Terminals::Table, Terminals::PortId)
                            .to(Ports::Table, Ports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_terminals_subscription_type_id")
                            .from(Terminals::Table, Terminals::SubscriptionTypeId)
                            .to(SubscriptionTypes::Table, SubscriptionTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_terminals_port_id")
                    .table(Terminals::Table)
                    .col(Terminals::PortId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_terminals_status")
                    .table(Terminals::Table)
                    .col(Terminals::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Terminals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Terminals {
    Table,
    Id,
    PortId,
    TerminalName,
    ShortCode,
    Status,
    IsActive,
    SubscriptionTypeId,
    ActivationStartDate,
    ActivationEndDate,
    WorkOrderNo,
    WorkOrderDate,
    TaxId,
    Currency,
    Timezone,
    BillingAddress,
    BillingCity,
    BillingCountry,
    ShippingAddress,
    ShippingCity,
    ShippingCountry,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Ports {
    Table,
    Id,
}

#[derive(Iden)]
enum SubscriptionTypes {
    Table,
    Id,
}
