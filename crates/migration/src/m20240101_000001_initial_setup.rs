use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create containers_registered table (tare registry)
        manager
            .create_table(
                Table::create()
                    .table(ContainersRegistered::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainersRegistered::ContainerId)
                            .string_len(15)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainersRegistered::Weight).big_integer())
                    .col(ColumnDef::new(ContainersRegistered::Unit).string_len(10))
                    .to_owned(),
            )
            .await?;

        // Create transactions table
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Datetime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Transactions::Direction)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Truck).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Transactions::Containers)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Transactions::Bruto).big_integer().not_null())
                    .col(ColumnDef::new(Transactions::TruckTara).big_integer())
                    .col(ColumnDef::new(Transactions::Neto).big_integer())
                    .col(
                        ColumnDef::new(Transactions::Produce)
                            .string_len(50)
                            .not_null()
                            .default("na"),
                    )
                    .col(ColumnDef::new(Transactions::SessionId).integer())
                    .to_owned(),
            )
            .await?;

        // Open-session lookups: latest `in` row per truck
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_truck_direction")
                    .table(Transactions::Table)
                    .col(Transactions::Truck)
                    .col(Transactions::Direction)
                    .to_owned(),
            )
            .await?;

        // At most one `out` row per session
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_transactions_session_direction")
                    .table(Transactions::Table)
                    .col(Transactions::SessionId)
                    .col(Transactions::Direction)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ContainersRegistered::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ContainersRegistered {
    Table,
    ContainerId,
    Weight,
    Unit,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    Datetime,
    Direction,
    Truck,
    Containers,
    Bruto,
    TruckTara,
    Neto,
    Produce,
    SessionId,
}
