pub use super::cached_product::Entity as CachedProduct;
pub use super::favorite::Entity as Favorite;
