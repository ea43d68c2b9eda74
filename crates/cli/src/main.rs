//! FreshCart CLI - storefront client for the remote e-commerce API.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (persists the session under FRESHCART_STATE_DIR)
//! freshcart auth login -e jane@example.com -p 'abc123!'
//!
//! # Inspect and mutate the cart (requires a signed-in session)
//! freshcart cart show
//! freshcart cart add 6428ebc6dc1175abc65ca0b9
//! freshcart cart set-count 6428ebc6dc1175abc65ca0b9 3
//!
//! # Browse the catalog (no session needed)
//! freshcart catalog products --page 2 --limit 40
//! ```
//!
//! # Commands
//!
//! - `auth` - Sign in/out, registration, password reset
//! - `cart` - Show and mutate the signed-in user's cart
//! - `catalog` - Browse products, categories, and brands

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "freshcart")]
#[command(author, version, about = "FreshCart storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in/out, registration, password reset
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Show and mutate the signed-in user's cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the public catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in and persist the session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account
    Register {
        /// Display name (3-20 characters)
        #[arg(short, long)]
        name: String,

        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Egyptian mobile number (e.g. 01012345678)
        #[arg(long)]
        phone: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show the current session
    Whoami,
    /// Request a password reset code by email
    Forgot {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Verify an emailed reset code
    VerifyCode {
        /// The numeric code from the reset email
        code: String,
    },
    /// Set a new password after a verified reset code
    Reset {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Replacement password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Fetch and display the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        product_id: String,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        product_id: String,
    },
    /// Set a line's quantity (0 removes the line)
    SetCount {
        /// Product id
        product_id: String,

        /// New quantity
        count: i64,
    },
    /// Delete the whole cart
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    Products {
        /// 1-based page number
        #[arg(long)]
        page: Option<u64>,

        /// Page size
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Show a single product
    Product {
        /// Product id
        id: String,
    },
    /// List categories
    Categories {
        /// 1-based page number
        #[arg(long)]
        page: Option<u64>,

        /// Page size
        #[arg(long)]
        limit: Option<u64>,
    },
    /// List brands
    Brands {
        /// 1-based page number
        #[arg(long)]
        page: Option<u64>,

        /// Page size
        #[arg(long)]
        limit: Option<u64>,
    },
    /// List subcategories
    Subcategories {
        /// 1-based page number
        #[arg(long)]
        page: Option<u64>,

        /// Page size
        #[arg(long)]
        limit: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter
    // Defaults to info level if RUST_LOG is not set
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&email, &password).await?;
            }
            AuthAction::Register {
                name,
                email,
                password,
                phone,
            } => {
                commands::auth::register(&name, &email, &password, &phone).await?;
            }
            AuthAction::Logout => commands::auth::logout()?,
            AuthAction::Whoami => commands::auth::whoami()?,
            AuthAction::Forgot { email } => commands::auth::forgot_password(&email).await?,
            AuthAction::VerifyCode { code } => commands::auth::verify_reset_code(&code).await?,
            AuthAction::Reset { email, password } => {
                commands::auth::reset_password(&email, &password).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show().await?,
            CartAction::Add { product_id } => commands::cart::add(&product_id).await?,
            CartAction::Remove { product_id } => commands::cart::remove(&product_id).await?,
            CartAction::SetCount { product_id, count } => {
                commands::cart::set_count(&product_id, count).await?;
            }
            CartAction::Clear => commands::cart::clear().await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Products { page, limit } => {
                commands::catalog::products(page, limit).await?;
            }
            CatalogAction::Product { id } => commands::catalog::product(&id).await?,
            CatalogAction::Categories { page, limit } => {
                commands::catalog::categories(page, limit).await?;
            }
            CatalogAction::Brands { page, limit } => {
                commands::catalog::brands(page, limit).await?;
            }
            CatalogAction::Subcategories { page, limit } => {
                commands::catalog::subcategories(page, limit).await?;
            }
        },
    }
    Ok(())
}
