pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

pub use config::Config;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use clients::catalog::CatalogClient;
use db::Store;
use models::product::{NewProduct, Product, ProductType};
use services::projection::project;
use services::sync::{CatalogSynchronizer, RefreshSource};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::List { search } => cmd_list(&config, search.as_deref()).await,

        Commands::Refresh => cmd_refresh(&config).await,

        Commands::Add {
            name,
            product_type,
            price,
            tax,
            image,
        } => cmd_add(&config, &name, &product_type, price, tax, image.as_deref()).await,

        Commands::Favorite { name } => cmd_favorite(&config, &name).await,

        Commands::Search { query } => {
            let query = query.join(" ");
            cmd_search(&config, &query).await
        }

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("Config file already exists.");
            }
            Ok(())
        }
    }
}

async fn build_synchronizer(config: &Config) -> anyhow::Result<CatalogSynchronizer> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    let client = CatalogClient::new(&config.catalog)?;

    Ok(CatalogSynchronizer::new(client, store))
}

fn print_products(products: &[Product]) {
    for product in products {
        let star = if product.is_favorite { "★" } else { "•" };

        println!("{} {} [{}]", star, product.product_name, product.product_type);
        println!("  Price: {:.2} | Tax: {:.1}%", product.price, product.tax);
        if let Some(image) = &product.image {
            println!("  Image: {}", image);
        }
    }
}

async fn cmd_list(config: &Config, search: Option<&str>) -> anyhow::Result<()> {
    let sync = build_synchronizer(config).await?;

    let outcome = sync.refresh().await;
    if outcome.source == RefreshSource::Cache {
        println!("⚠ Remote catalog unreachable - showing cached data.");
        println!();
    }

    let products = sync.filtered_products(search.unwrap_or("")).await;

    if products.is_empty() {
        match search {
            Some(s) => println!("No products matching '{}'.", s),
            None => {
                println!("No products.");
                println!();
                println!("Add one with: shelfarr add \"Product name\" --price 10 --tax 0");
            }
        }
        return Ok(());
    }

    println!("Products ({} total)", products.len());
    println!("{:-<70}", "");
    print_products(&products);
    println!();
    println!("Legend: ★ Favorite");

    Ok(())
}

async fn cmd_refresh(config: &Config) -> anyhow::Result<()> {
    let sync = build_synchronizer(config).await?;

    let outcome = sync.refresh().await;

    match outcome.source {
        RefreshSource::Remote => {
            println!("✓ Refreshed: {} products cached.", outcome.count);
        }
        RefreshSource::Cache => {
            println!("⚠ Remote catalog unreachable.");
            if let Some(e) = outcome.remote_error {
                println!("  Reason: {}", e);
            }
            println!("  Serving {} cached products.", outcome.count);
        }
    }

    Ok(())
}

async fn cmd_add(
    config: &Config,
    name: &str,
    product_type: &str,
    price: f64,
    tax: f64,
    image: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let Some(product_type) = ProductType::parse(product_type) else {
        println!("Unknown product type: {}", product_type);
        println!(
            "Use one of: {}",
            ProductType::ALL.map(|t| t.as_str()).join(", ")
        );
        return Ok(());
    };

    let image_bytes = match image {
        Some(path) => Some(
            tokio::fs::read(path)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read image {}: {}", path.display(), e))?,
        ),
        None => None,
    };

    let input = NewProduct {
        name: name.to_string(),
        product_type,
        price,
        tax,
    };

    let sync = build_synchronizer(config).await?;
    let outcome = sync.add_product(input, image_bytes).await;

    println!("{}: {}", outcome.title, outcome.message);

    if outcome.success {
        println!();
        println!("Run 'shelfarr refresh' to pull the updated catalog.");
    }

    Ok(())
}

async fn cmd_favorite(config: &Config, name: &str) -> anyhow::Result<()> {
    let sync = build_synchronizer(config).await?;

    // Populate the working set first; falls back to cache when offline.
    sync.refresh().await;

    if sync.toggle_favorite(name).await {
        let flagged = sync
            .products()
            .await
            .into_iter()
            .find(|p| p.product_name == name)
            .is_some_and(|p| p.is_favorite);

        if flagged {
            println!("★ Marked '{}' as favorite.", name);
        } else {
            println!("• Removed '{}' from favorites.", name);
        }
    } else {
        println!("Product '{}' not found.", name);
        println!("Use 'shelfarr list' to see product names.");
    }

    Ok(())
}

async fn cmd_search(config: &Config, query: &str) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let cached = store.fetch_products().await.unwrap_or_default();
    let results = project(&cached, query);

    if results.is_empty() {
        println!("No cached products matching '{}'.", query);
        return Ok(());
    }

    println!("Cached products matching '{}' ({} found)", query, results.len());
    println!("{:-<70}", "");
    print_products(&results);

    Ok(())
}
