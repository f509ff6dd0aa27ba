use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CachedProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CachedProducts::ProductName)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CachedProducts::ProductType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CachedProducts::Price).double().not_null())
                    .col(ColumnDef::new(CachedProducts::Tax).double().not_null())
                    .col(ColumnDef::new(CachedProducts::Image).string())
                    .col(
                        ColumnDef::new(CachedProducts::CachedAt)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorites::ProductName)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Favorites::IsFavorite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Favorites::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CachedProducts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CachedProducts {
    Table,
    ProductName,
    ProductType,
    Price,
    Tax,
    Image,
    CachedAt,
}

#[derive(DeriveIden)]
enum Favorites {
    Table,
    ProductName,
    IsFavorite,
    UpdatedAt,
}
