//! DDD Micro CLI - talk to the shop backends from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session is kept in ~/.ddd-micro/session.json)
//! micro-cli login -e jane@example.com -p 'correct horse'
//!
//! # Browse the catalog
//! micro-cli products list --limit 5
//! micro-cli products search "running shoe"
//!
//! # Work with the basket
//! micro-cli basket add 42 --quantity 2 --unit-price 19.99
//! micro-cli basket show
//!
//! # Admin analytics
//! micro-cli payments stats --period weekly
//! ```
//!
//! Every command prints the backend's response envelope as JSON on stdout.
//! Logs go to stderr; set `RUST_LOG` to change verbosity.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use ddd_micro_core::{PaymentId, ProductId, SortBy, SortOrder, StatsPeriod};
use rust_decimal::Decimal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "micro-cli")]
#[command(author, version, about = "DDD Micro shop client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and cache the session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "SHOP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the cached session
    Logout,
    /// Show the cached user
    Whoami,
    /// Create an account
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "SHOP_PASSWORD", hide_env_values = true)]
        password: String,

        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,
    },
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the basket
    Basket {
        #[command(subcommand)]
        action: BasketAction,
    },
    /// Inspect payments
    Payments {
        #[command(subcommand)]
        action: PaymentAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        /// Only featured products
        #[arg(long)]
        featured: bool,
        /// `name`, `price`, `created_at` or `updated_at`
        #[arg(long)]
        sort_by: Option<SortBy>,
        /// `asc` or `desc`
        #[arg(long)]
        sort_order: Option<SortOrder>,
    },
    /// Show one product
    Get {
        /// Product ID
        id: ProductId,
    },
    /// Search the catalog
    Search {
        /// Search text
        query: String,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
enum BasketAction {
    /// Show the basket
    Show,
    /// Add a product
    Add {
        /// Product ID
        product_id: ProductId,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        #[arg(short, long)]
        unit_price: Decimal,
    },
    /// Remove products
    Remove {
        /// Product IDs, removed in order
        #[arg(required = true)]
        product_ids: Vec<ProductId>,
    },
    /// Empty the basket
    Clear,
}

#[derive(Subcommand)]
enum PaymentAction {
    /// List your payments
    List {
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one payment
    Get {
        /// Payment ID
        id: PaymentId,
    },
    /// Payment analytics (admin)
    Stats {
        /// `daily`, `weekly`, `monthly` or `yearly`
        #[arg(long, default_value = "monthly")]
        period: StatsPeriod,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ddd_micro_cli=info,ddd_micro_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let shop = commands::connect()?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::account::login(&shop, &email, password).await?;
        }
        Commands::Logout => commands::account::logout(&shop)?,
        Commands::Whoami => commands::account::whoami(&shop)?,
        Commands::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            commands::account::register(&shop, &email, password, first_name, last_name).await?;
        }
        Commands::Products { action } => match action {
            ProductAction::List {
                offset,
                limit,
                category,
                brand,
                featured,
                sort_by,
                sort_order,
            } => {
                let params = ddd_micro_client::products::ListProductsParams {
                    offset,
                    limit,
                    category,
                    brand,
                    is_featured: featured.then_some(true),
                    sort_by,
                    sort_order,
                    ..Default::default()
                };
                commands::catalog::list(&shop, &params).await?;
            }
            ProductAction::Get { id } => commands::catalog::get(&shop, id).await?,
            ProductAction::Search { query, limit } => {
                commands::catalog::search(&shop, query, limit).await?;
            }
        },
        Commands::Basket { action } => match action {
            BasketAction::Show => commands::basket::show(&shop).await?,
            BasketAction::Add {
                product_id,
                quantity,
                unit_price,
            } => commands::basket::add(&shop, product_id, quantity, unit_price).await?,
            BasketAction::Remove { product_ids } => {
                commands::basket::remove(&shop, &product_ids).await?;
            }
            BasketAction::Clear => commands::basket::clear(&shop).await?,
        },
        Commands::Payments { action } => match action {
            PaymentAction::List { offset, limit } => {
                commands::payments::list(&shop, offset, limit).await?;
            }
            PaymentAction::Get { id } => commands::payments::get(&shop, &id).await?,
            PaymentAction::Stats { period } => commands::payments::stats(&shop, period).await?,
        },
    }
    Ok(())
}
