use crate::entities::{favorite, prelude::*};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use std::collections::HashMap;

pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Upserts the flag for one product name. Names unknown to the product
    /// cache are accepted; the flag simply reattaches if the product shows
    /// up in a later fetch.
    pub async fn set(&self, product_name: &str, is_favorite: bool) -> Result<()> {
        let active_model = favorite::ActiveModel {
            product_name: Set(product_name.to_string()),
            is_favorite: Set(is_favorite),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        Favorite::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(favorite::Column::ProductName)
                    .update_columns([
                        favorite::Column::IsFavorite,
                        favorite::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    /// The full name → flag map, used to re-merge flags onto fetched rows.
    pub async fn all(&self) -> Result<HashMap<String, bool>> {
        let rows = Favorite::find().all(&self.conn).await?;
        Ok(rows
            .into_iter()
            .map(|m| (m.product_name, m.is_favorite))
            .collect())
    }
}
