pub mod projection;
pub use projection::project;

pub mod sync;
pub use sync::{CatalogSynchronizer, RefreshOutcome, RefreshSource};
