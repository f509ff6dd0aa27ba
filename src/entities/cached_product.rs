use sea_orm::entity::prelude::*;

/// Last-known snapshot of a remote product, one row per product name.
/// Remote-owned fields only; the favorite flag lives in its own table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cached_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_name: String,
    pub product_type: String,
    pub price: f64,
    pub tax: f64,
    pub image: Option<String>,
    pub cached_at: String, // ISO8601, SQLite stores these as text anyway
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
