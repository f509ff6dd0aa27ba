//! Catalog synchronization: the session working set, refresh with cache
//! fallback, favorite toggling, and product submission.

use crate::clients::catalog::{CatalogClient, CatalogError};
use crate::db::Store;
use crate::models::product::{NewProduct, Product, SubmitOutcome};
use crate::services::projection::project;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Where the working set came from after a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSource {
    /// Fresh data from the remote catalog.
    Remote,
    /// The remote fetch failed; the set is last-known cached data,
    /// possibly empty.
    Cache,
}

/// Typed result of a refresh. The synchronizer never re-raises a fetch
/// failure; it reports here what it fell back to and why, so callers can
/// tell "fresh", "stale", and "nothing" apart.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub source: RefreshSource,
    pub count: usize,
    pub remote_error: Option<CatalogError>,
}

/// Owns the in-memory product set driving the current session.
///
/// All mutation entry points — refresh completion and favorite toggles —
/// serialize through one `RwLock`, so async results are applied under the
/// same primitive as user-triggered writes. Overlapping refreshes are not
/// guarded against; the last writer wins.
pub struct CatalogSynchronizer {
    client: CatalogClient,
    store: Store,
    products: RwLock<Vec<Product>>,
    is_loading: AtomicBool,
}

impl CatalogSynchronizer {
    #[must_use]
    pub fn new(client: CatalogClient, store: Store) -> Self {
        Self {
            client,
            store,
            products: RwLock::new(Vec::new()),
            is_loading: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::Acquire)
    }

    /// Snapshot of the working set in its current order.
    pub async fn products(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// Filtered, favorites-first view of the working set.
    pub async fn filtered_products(&self, search: &str) -> Vec<Product> {
        let products = self.products.read().await;
        project(&products, search)
    }

    /// Fetches the remote catalog and replaces the working set.
    ///
    /// On success the fetched records become the working set with locally
    /// owned favorite flags re-applied by name, ordered favorites-first,
    /// and are written through to the cache. On failure the working set
    /// becomes whatever the cache holds. Neither path raises; cache faults
    /// are logged and absorbed.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.is_loading.store(true, Ordering::Release);

        let outcome = match self.client.fetch_all().await {
            Ok(fetched) => {
                let reconciled = self.reconcile(fetched).await;
                let count = reconciled.len();

                *self.products.write().await = reconciled.clone();

                if let Err(e) = self.store.upsert_products(&reconciled).await {
                    warn!("Failed to write catalog to cache: {e:#}");
                }

                info!("Refreshed catalog: {} products", count);
                RefreshOutcome {
                    source: RefreshSource::Remote,
                    count,
                    remote_error: None,
                }
            }
            Err(e) => {
                warn!("Catalog fetch failed, falling back to cache: {e}");

                let cached = match self.store.fetch_products().await {
                    Ok(products) => products,
                    Err(store_err) => {
                        warn!("Cache read failed: {store_err:#}");
                        Vec::new()
                    }
                };
                let count = cached.len();

                *self.products.write().await = cached;

                RefreshOutcome {
                    source: RefreshSource::Cache,
                    count,
                    remote_error: Some(e),
                }
            }
        };

        self.is_loading.store(false, Ordering::Release);
        outcome
    }

    /// Re-applies locally owned favorite flags onto freshly fetched records
    /// and orders favorites first. The remote list stays authoritative for
    /// membership and every other field.
    async fn reconcile(&self, mut fetched: Vec<Product>) -> Vec<Product> {
        let favorites: HashMap<String, bool> = match self.store.favorite_names().await {
            Ok(map) => map,
            Err(e) => {
                warn!("Favorite lookup failed, flags reset for this session: {e:#}");
                HashMap::new()
            }
        };

        for product in &mut fetched {
            product.is_favorite = favorites
                .get(&product.product_name)
                .copied()
                .unwrap_or(false);
        }

        fetched.sort_by_key(|p| !p.is_favorite);
        fetched
    }

    /// Flips the favorite flag of the named product and persists the new
    /// value. Returns false — touching nothing, in memory or on disk —
    /// when the product is not in the working set. Never calls the remote.
    pub async fn toggle_favorite(&self, product_name: &str) -> bool {
        let mut products = self.products.write().await;

        let Some(product) = products
            .iter_mut()
            .find(|p| p.product_name == product_name)
        else {
            return false;
        };

        product.is_favorite = !product.is_favorite;
        let new_state = product.is_favorite;
        drop(products);

        if let Err(e) = self.store.set_favorite(product_name, new_state).await {
            warn!("Failed to persist favorite for '{product_name}': {e:#}");
        }

        true
    }

    /// Validates and submits a new product, with optional pre-encoded JPEG
    /// image bytes. Validation failures short-circuit before any network
    /// activity. The outcome is always a user-facing title + message pair.
    pub async fn add_product(&self, input: NewProduct, image: Option<Vec<u8>>) -> SubmitOutcome {
        if let Err(e) = input.validate() {
            return SubmitOutcome::failed(e.to_string());
        }

        match self.client.submit(&input, image).await {
            Ok(true) => SubmitOutcome::succeeded("Product added successfully"),
            Ok(false) => SubmitOutcome::failed("Product not added"),
            Err(e) => {
                warn!("Could not build submit request: {e}");
                SubmitOutcome::failed("Failed to add product")
            }
        }
    }
}
