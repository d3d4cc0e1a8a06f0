//! Migration to create operations table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Operations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Operations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Operations::UserId).string().not_null())
                    .col(ColumnDef::new(Operations::PatientId).string_len(50).not_null())
                    .col(ColumnDef::new(Operations::PatientAge).integer().not_null())
                    .col(ColumnDef::new(Operations::DateOfBirth).date().null())
                    .col(ColumnDef::new(Operations::OperationDate).date().not_null())
                    .col(
                        ColumnDef::new(Operations::OperatorName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Operations::OperatorLevel)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Operations::Urgency).string_len(20).null())
                    .col(ColumnDef::new(Operations::AsaGrade).string_len(10).null())
                    .col(
                        ColumnDef::new(Operations::OperationName)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Operations::Hospital).string_len(200).not_null())
                    .col(ColumnDef::new(Operations::Notes).text().null())
                    .col(ColumnDef::new(Operations::Complications).text().null())
                    .col(
                        ColumnDef::new(Operations::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Operations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Operations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_operations_user")
                            .from(Operations::Table, Operations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operations_user_id")
                    .table(Operations::Table)
                    .col(Operations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operations_operation_date")
                    .table(Operations::Table)
                    .col(Operations::OperationDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operations_hospital")
                    .table(Operations::Table)
                    .col(Operations::Hospital)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operations_operator_level")
                    .table(Operations::Table)
                    .col(Operations::OperatorLevel)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operations_is_private")
                    .table(Operations::Table)
                    .col(Operations::IsPrivate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Operations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Operations {
    Table,
    Id,
    UserId,
    PatientId,
    PatientAge,
    DateOfBirth,
    OperationDate,
    OperatorName,
    OperatorLevel,
    Urgency,
    AsaGrade,
    OperationName,
    Hospital,
    Notes,
    Complications,
    IsPrivate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
