use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Todo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Todo::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Todo::Title).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Todo::ActivityType)
                            .string_len(16)
                            .not_null()
                            .default("regular"),
                    )
                    .col(ColumnDef::new(Todo::Completed).boolean().not_null().default(false))
                    .col(ColumnDef::new(Todo::StartDate).date_time())
                    .col(ColumnDef::new(Todo::EndDate).date_time())
                    .col(ColumnDef::new(Todo::ReminderAt).date_time())
                    .col(
                        ColumnDef::new(Todo::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Todo::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Todo::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_todo_user")
                            .from(Todo::Table, Todo::UserId)
                            .to(Alias::new("user"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Todo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Todo {
    Table,
    Id,
    Title,
    ActivityType,
    Completed,
    StartDate,
    EndDate,
    ReminderAt,
    UserId,
    CreatedAt,
    UpdatedAt,
}
