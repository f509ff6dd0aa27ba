use crate::config::CatalogConfig;
use crate::models::product::{NewProduct, Product};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors returned by the remote catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog endpoint answered with a non-success status.
    #[error("catalog API returned status {0}")]
    Status(StatusCode),

    /// The response body could not be decoded as a product list.
    #[error("failed to decode catalog response: {0}")]
    Decode(#[source] reqwest::Error),

    /// A request part could not be assembled (bad metadata, not I/O).
    #[error("failed to build request: {0}")]
    Request(String),
}

/// HTTP client for the remote product catalog.
///
/// Two operations: fetch the full product list, and submit a new product as
/// a multipart form. There is no retry policy; every call succeeds or fails
/// exactly once.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.request_timeout_seconds)))
            .build()
            .context("Failed to build catalog HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the entire remote catalog in one request.
    ///
    /// # Errors
    ///
    /// Fails on transport error, non-2xx status, or an undecodable body.
    /// Callers decide whether to fall back to cached data.
    pub async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/get", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }

        let products: Vec<Product> = response.json().await.map_err(CatalogError::Decode)?;
        debug!("Fetched {} products from catalog", products.len());

        Ok(products)
    }

    /// Submits a new product, with optional JPEG image bytes, as
    /// multipart/form-data.
    ///
    /// Once the request exists, any failure — transport error or a
    /// non-success status — resolves to `Ok(false)` rather than an error;
    /// the absorbed failure is logged here. Only an inability to assemble
    /// the request itself is a hard failure.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Request`] when a form part cannot be built.
    pub async fn submit(
        &self,
        product: &NewProduct,
        image: Option<Vec<u8>>,
    ) -> Result<bool, CatalogError> {
        let url = format!("{}/add", self.base_url);

        let mut form = Form::new()
            .text("product_name", product.name.clone())
            .text("product_type", product.product_type.to_string())
            .text("price", product.price.to_string())
            .text("tax", product.tax.to_string());

        if let Some(bytes) = image {
            let part = Part::bytes(bytes)
                .file_name("image.jpg")
                .mime_str("image/jpeg")
                .map_err(|e| CatalogError::Request(e.to_string()))?;
            form = form.part("files[]", part);
        }

        match self.client.post(&url).multipart(form).send().await {
            Ok(response) if response.status().is_success() => Ok(true),
            Ok(response) => {
                warn!(
                    "Catalog rejected product '{}': status {}",
                    product.name,
                    response.status()
                );
                Ok(false)
            }
            Err(e) => {
                warn!("Catalog submit for '{}' failed: {}", product.name, e);
                Ok(false)
            }
        }
    }
}
