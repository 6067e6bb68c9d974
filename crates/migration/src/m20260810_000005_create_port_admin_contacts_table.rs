//! Migration: Create port admin contacts table
//!
//! Contacts carry their own verification token columns; only one token is
//! valid at a time so no separate token table is needed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PortAdminContacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortAdminContacts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PortAdminContacts::PortId).uuid().not_null())
                    .col(
                        ColumnDef::new(PortAdminContacts::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PortAdminContacts::ContactName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortAdminContacts::Status)
                            .string_len(16)
                            .not_null()
                            .default("inactive"),
                    )
                    .col(
                        ColumnDef::new(PortAdminContacts::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PortAdminContacts::VerificationToken)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PortAdminContacts::VerificationTokenExpires)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(PortAdminContacts::UserId).uuid().null())
                    .col(
                        ColumnDef::new(PortAdminContacts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PortAdminContacts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_port_admin_contacts_port_id")
                            .from(PortAdminContacts::Table, PortAdminContacts::PortId)
                            .to(Ports::Table, Ports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_port_admin_contacts_user_id")
                            .from(PortAdminContacts::Table, PortAdminContacts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_port_admin_contacts_port_id")
                    .table(PortAdminContacts::Table)
                    .col(PortAdminContacts::PortId)
                    .to_owned(),
            )
            .await?;

        // Token lookups happen on consume-verification
        manager
            .create_index(
                Index::create()
                    .name("idx_port_admin_contacts_verification_token")
                    .table(PortAdminContacts::Table)
                    .col(PortAdminContacts::VerificationToken)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortAdminContacts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PortAdminContacts {
    Table,
    Id,
    PortId,
    Email,
    ContactName,
    Status,
    IsVerified,
    VerificationToken,
    VerificationTokenExpires,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Ports {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
