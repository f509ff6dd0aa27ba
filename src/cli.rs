//! CLI module - Command-line interface for Shelfarr
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shelfarr - Offline-first product catalog
/// Syncs a remote product catalog into a local cache with user favorites
#[derive(Parser)]
#[command(name = "shelfarr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh from the remote catalog and list products
    #[command(alias = "ls", alias = "l")]
    List {
        /// Only show products whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Fetch the remote catalog and update the local cache
    #[command(alias = "sync")]
    Refresh,

    /// Submit a new product to the remote catalog
    #[command(alias = "a")]
    Add {
        /// Product name
        name: String,

        /// Product type (Product, Service, Electronics, Clothing, Others, Groceries)
        #[arg(long = "type", default_value = "Product")]
        product_type: String,

        /// Selling price
        #[arg(long)]
        price: f64,

        /// Tax rate in percent
        #[arg(long)]
        tax: f64,

        /// Path to a JPEG image to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Toggle the favorite flag on a product
    #[command(alias = "fav", alias = "f")]
    Favorite {
        /// Product name
        name: String,
    },

    /// Search cached products without touching the network
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create default config file
    Init,
}
