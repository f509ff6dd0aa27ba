use crate::entities::{cached_product, prelude::*};
use crate::models::product::Product;
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Writes every product through to the cache, inserting new rows and
    /// overwriting existing ones by name. Returns the number written.
    pub async fn upsert_all(&self, products: &[Product]) -> Result<usize> {
        if products.is_empty() {
            return Ok(0);
        }

        let cached_at = chrono::Utc::now().to_rfc3339();

        for product in products {
            let active_model = cached_product::ActiveModel {
                product_name: Set(product.product_name.clone()),
                product_type: Set(product.product_type.clone()),
                price: Set(product.price),
                tax: Set(product.tax),
                image: Set(product.image.clone()),
                cached_at: Set(cached_at.clone()),
            };

            CachedProduct::insert(active_model)
                .on_conflict(
                    sea_orm::sea_query::OnConflict::column(cached_product::Column::ProductName)
                        .update_columns([
                            cached_product::Column::ProductType,
                            cached_product::Column::Price,
                            cached_product::Column::Tax,
                            cached_product::Column::Image,
                            cached_product::Column::CachedAt,
                        ])
                        .to_owned(),
                )
                .exec(&self.conn)
                .await?;
        }

        Ok(products.len())
    }

    /// Every cached row, unordered. The favorite flag is joined in by the
    /// caller; rows come back with it unset.
    pub async fn fetch_all(&self) -> Result<Vec<cached_product::Model>> {
        Ok(CachedProduct::find().all(&self.conn).await?)
    }
}
