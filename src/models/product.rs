use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// A catalog product as the remote service reports it, plus the locally
/// owned favorite flag. `product_name` is the natural key: the cache and
/// the working set both match on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_name: String,
    pub product_type: String,
    pub price: f64,
    pub tax: f64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    /// Local-only. The remote service has no favorite concept, so this is
    /// never serialized and defaults to false on every fetch.
    #[serde(default, skip_serializing)]
    pub is_favorite: bool,
}

// The live endpoint sends "" for products without an image.
fn empty_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(de)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// The well-known product categories accepted by the submission form.
/// The remote stores the type as free text, so fetched products keep a
/// plain string; this enum only gates what we send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    Product,
    Service,
    Electronics,
    Clothing,
    Others,
    Groceries,
}

impl ProductType {
    pub const ALL: [Self; 6] = [
        Self::Product,
        Self::Service,
        Self::Electronics,
        Self::Clothing,
        Self::Others,
        Self::Groceries,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Service => "Service",
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Others => "Others",
            Self::Groceries => "Groceries",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for a product submission. Validated before any network activity.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub product_type: ProductType,
    pub price: f64,
    pub tax: f64,
}

impl NewProduct {
    /// Checks the submission fields in the order the form presents them.
    ///
    /// # Errors
    ///
    /// Returns the first failing field: empty name, non-positive price, or
    /// negative tax. NaN and infinite values fail the numeric checks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(ValidationError::InvalidPrice);
        }
        if !(self.tax.is_finite() && self.tax >= 0.0) {
            return Err(ValidationError::InvalidTax);
        }
        Ok(())
    }
}

/// Field-level submission errors. Messages match the user-facing alerts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Product name is required")]
    EmptyName,

    #[error("Invalid price")]
    InvalidPrice,

    #[error("Invalid tax rate")]
    InvalidTax,
}

/// User-facing result of a submission attempt: a short alert title plus a
/// message, never an error type. Failures inside the request collapse here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub success: bool,
    pub title: &'static str,
    pub message: String,
}

impl SubmitOutcome {
    #[must_use]
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            title: "Success",
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            title: "Error",
            message: message.into(),
        }
    }
}
