//! Migration to create cpd_entries table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CpdEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CpdEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CpdEntries::UserId).string().not_null())
                    .col(ColumnDef::new(CpdEntries::Title).string_len(200).not_null())
                    .col(ColumnDef::new(CpdEntries::Description).string_len(1000).null())
                    .col(ColumnDef::new(CpdEntries::Category).string_len(100).not_null())
                    .col(ColumnDef::new(CpdEntries::Hours).double().not_null())
                    .col(ColumnDef::new(CpdEntries::DateCompleted).date().not_null())
                    .col(ColumnDef::new(CpdEntries::Provider).string_len(200).null())
                    .col(ColumnDef::new(CpdEntries::CertificateUrl).string().null())
                    .col(
                        ColumnDef::new(CpdEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CpdEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cpd_entries_user")
                            .from(CpdEntries::Table, CpdEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cpd_entries_user_id")
                    .table(CpdEntries::Table)
                    .col(CpdEntries::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cpd_entries_date_completed")
                    .table(CpdEntries::Table)
                    .col(CpdEntries::DateCompleted)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CpdEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CpdEntries {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Category,
    Hours,
    DateCompleted,
    Provider,
    CertificateUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
