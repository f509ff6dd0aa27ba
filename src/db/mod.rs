use crate::models::product::Product;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Facade over the local SQLite cache. The cache is advisory: it holds the
/// last-known product set plus the locally owned favorite flags, and is
/// never a correctness-critical store.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Cache database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn product_repo(&self) -> repositories::product::ProductRepository {
        repositories::product::ProductRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    /// Writes the product set through to the cache, upserting by name.
    pub async fn upsert_products(&self, products: &[Product]) -> Result<usize> {
        self.product_repo().upsert_all(products).await
    }

    /// Every cached product with its favorite flag joined on, unordered.
    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        let favorites = self.favorite_repo().all().await?;
        let rows = self.product_repo().fetch_all().await?;

        Ok(rows
            .into_iter()
            .map(|m| Product {
                is_favorite: favorites.get(&m.product_name).copied().unwrap_or(false),
                product_name: m.product_name,
                product_type: m.product_type,
                price: m.price,
                tax: m.tax,
                image: m.image,
            })
            .collect())
    }

    pub async fn set_favorite(&self, product_name: &str, is_favorite: bool) -> Result<()> {
        self.favorite_repo().set(product_name, is_favorite).await
    }

    pub async fn favorite_names(&self) -> Result<HashMap<String, bool>> {
        self.favorite_repo().all().await
    }
}
