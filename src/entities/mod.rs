pub mod prelude;

pub mod cached_product;
pub mod favorite;
