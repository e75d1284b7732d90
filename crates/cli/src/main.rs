//! Loom & Lane CLI - Cart and catalog from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two of product 42 in red, size M
//! loom-cli cart add 42 -q 2 --color Red --size M
//!
//! # Show the cart with prices
//! loom-cli cart list
//!
//! # Set a quantity (zero or less removes the line)
//! loom-cli cart update 42 -1 --color Red --size M
//!
//! # Live-search preview
//! loom-cli products search saree
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, remove, update, list, count, total, clear
//! - `products` - Featured, search, category, show, categories
//!
//! Configuration comes from the environment; see
//! [`loom_lane_storefront::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use loom_lane_core::ProductId;
use loom_lane_storefront::config::StorefrontConfig;
use loom_lane_storefront::StorefrontError;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "loom-cli")]
#[command(author, version, about = "Loom & Lane cart and catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

/// Variant selectors shared by the cart line commands.
#[derive(clap::Args)]
struct VariantArgs {
    /// Colour variant
    #[arg(long)]
    color: Option<String>,

    /// Size variant
    #[arg(long)]
    size: Option<String>,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product ID
        id: ProductId,

        /// Number of units to add
        #[arg(
            short,
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        quantity: u32,

        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Remove a line from the cart
    Remove {
        /// Product ID
        id: ProductId,

        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Set the quantity of a line (zero or less removes it)
    Update {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Show the cart with prices
    List,
    /// Print the number of units in the cart
    Count,
    /// Print the cart total
    Total,
    /// Remove every line from the cart
    Clear {
        /// Confirm clearing the cart
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List featured products
    Featured,
    /// Search products by name, category or description
    Search {
        /// Search text (at least two characters)
        query: String,

        /// Maximum number of results to show
        #[arg(short, long, default_value_t = commands::products::DEFAULT_PREVIEW_LIMIT)]
        limit: usize,
    },
    /// List products in a category
    Category {
        /// Category name (case-insensitive)
        name: String,
    },
    /// Show one product
    Show {
        /// Product ID
        id: ProductId,
    },
    /// List categories
    Categories,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = StorefrontConfig::from_env();

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loom_lane_storefront=info,loom_lane_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(StorefrontError::from(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_reportable() {
                let event_id = sentry::capture_error(&e);
                tracing::error!(error = %e, sentry_event_id = %event_id, "Command failed");
            } else {
                tracing::error!(error = %e, "Command failed");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> loom_lane_storefront::Result<()> {
    match cli.command {
        Commands::Cart { action } => {
            let mut service = commands::open_cart(config)?;
            match action {
                CartAction::Add {
                    id,
                    quantity,
                    variant,
                } => {
                    commands::cart::add(&mut service, variant.key(id), quantity).await?;
                }
                CartAction::Remove { id, variant } => {
                    commands::cart::remove(&mut service, &variant.key(id))?;
                }
                CartAction::Update {
                    id,
                    quantity,
                    variant,
                } => commands::cart::update(&mut service, &variant.key(id), quantity)?,
                CartAction::List => commands::cart::list(&service).await,
                CartAction::Count => commands::cart::count(&service),
                CartAction::Total => commands::cart::total(&service).await,
                CartAction::Clear { yes } => commands::cart::clear(&mut service, yes)?,
            }
        }
        Commands::Products { action } => {
            let catalog = commands::open_catalog(config)?;
            match action {
                ProductsAction::Featured => commands::products::featured(&catalog).await?,
                ProductsAction::Search { query, limit } => {
                    commands::products::search(&catalog, &query, limit).await?;
                }
                ProductsAction::Category { name } => {
                    commands::products::category(&catalog, &name).await?;
                }
                ProductsAction::Show { id } => commands::products::show(&catalog, id).await?,
                ProductsAction::Categories => commands::products::categories(&catalog).await?,
            }
        }
    }
    Ok(())
}

impl VariantArgs {
    fn key(&self, id: ProductId) -> loom_lane_core::LineKey {
        loom_lane_core::LineKey::new(id, self.color.as_deref(), self.size.as_deref())
    }
}
