//! Éclat CLI - drive the storefront from a terminal.
//!
//! State is kept in a data directory (`ECLAT_DATA_DIR`, default `.eclat`)
//! with one JSON file per slice, so consecutive invocations share a cart,
//! a session and an order history.
//!
//! # Usage
//!
//! ```bash
//! # Browse and fill the cart
//! eclat catalog list --category parfums
//! eclat cart add p1
//!
//! # Sign in with the demo account
//! eclat auth login -e sophie@example.com -p password123
//!
//! # Check out with a promo code
//! eclat checkout --country senegal --method express --promo PROMO20 --payment wave
//!
//! # Back-office views
//! eclat admin summary
//! ```
//!
//! # Commands
//!
//! - `catalog` - Browse products
//! - `cart` - Show and edit the cart
//! - `favorites` - Show and edit favorites
//! - `auth` - Sign in, register, continue as guest, edit profile
//! - `checkout` - Run the checkout flow and place an order
//! - `orders` - Order history
//! - `admin` - Order filters and dashboard figures

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command output is the product of this binary.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eclat_core::{Category, Country, PaymentMethod, ShippingMethod};
use eclat_storefront::config::StorefrontConfig;
use eclat_storefront::db::FileRepository;
use eclat_storefront::services::admin::StatusFilter;
use eclat_storefront::{AppError, AppState};

mod commands;

#[derive(Parser)]
#[command(name = "eclat")]
#[command(author, version, about = "Éclat storefront from the command line")]
struct Cli {
    /// Data directory (overrides `ECLAT_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show and edit favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Manage the session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Check out the current cart
    Checkout(CheckoutArgs),
    /// Order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Back-office order views
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only this category (visage, maquillage, soins, parfums)
        #[arg(short, long)]
        category: Option<Category>,

        /// Only products carrying this tag (e.g. NOUVEAU)
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add { id: String },
    /// Remove a product's line
    Remove { id: String },
    /// Set a line's quantity (values below 1 are ignored)
    Set { id: String, quantity: u32 },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites
    List,
    /// Add a product to favorites
    Add { id: String },
    /// Remove a product from favorites
    Remove { id: String },
    /// Flip a product's favorite state
    Toggle { id: String },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Continue without an account
    Guest,
    /// End the session
    Logout,
    /// Show the current session
    Whoami,
    /// Update the current user's profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
}

/// Checkout options. Omitted address and phone fall back to the profile.
#[derive(clap::Args)]
struct CheckoutArgs {
    /// Destination (senegal, mali, guinea)
    #[arg(long, default_value = "senegal")]
    country: Country,

    /// Delivery speed (standard, express)
    #[arg(long, default_value = "standard")]
    method: ShippingMethod,

    /// Delivery address
    #[arg(long)]
    address: Option<String>,

    /// Contact phone number
    #[arg(long)]
    phone: Option<String>,

    /// Delivery instructions
    #[arg(long)]
    instructions: Option<String>,

    /// Email for order notifications
    #[arg(long)]
    notify_email: Option<String>,

    /// Send SMS notifications
    #[arg(long)]
    sms: bool,

    /// Add gift wrapping
    #[arg(long)]
    gift_wrap: bool,

    /// Promo code
    #[arg(long)]
    promo: Option<String>,

    /// Payment method (card, wave, orange-money, cash)
    #[arg(long, default_value = "card")]
    payment: PaymentMethod,

    /// Stop at the payment step and print the price breakdown
    #[arg(long)]
    quote_only: bool,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, newest first
    List,
    /// Show one order
    Show { id: String },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Filter orders
    Orders {
        /// Status filter (all, processing, shipped, delivered)
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,

        /// Search order ids and product names
        #[arg(short = 'q', long)]
        search: Option<String>,
    },
    /// Dashboard figures
    Summary,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eclat_storefront=info,eclat_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli.command, config).await {
        e.report();
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: StorefrontConfig) -> Result<(), AppError> {
    let repository = FileRepository::open(&config.data_dir)?;
    let mut state = AppState::load(config, repository)?;

    match command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, tag } => {
                commands::catalog::list(&state, category, tag.as_deref());
            }
            CatalogAction::Show { id } => commands::catalog::show(&state, &id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id } => commands::cart::add(&mut state, &id)?,
            CartAction::Remove { id } => commands::cart::remove(&mut state, &id)?,
            CartAction::Set { id, quantity } => commands::cart::set(&mut state, &id, quantity)?,
            CartAction::Clear => commands::cart::clear(&mut state)?,
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(&state),
            FavoritesAction::Add { id } => commands::favorites::add(&mut state, &id)?,
            FavoritesAction::Remove { id } => commands::favorites::remove(&mut state, &id)?,
            FavoritesAction::Toggle { id } => commands::favorites::toggle(&mut state, &id)?,
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&mut state, &email, &password).await?;
            }
            AuthAction::Register {
                name,
                email,
                password,
            } => commands::auth::register(&mut state, &name, &email, &password).await?,
            AuthAction::Guest => commands::auth::guest(&mut state)?,
            AuthAction::Logout => commands::auth::logout(&mut state)?,
            AuthAction::Whoami => commands::auth::whoami(&state),
            AuthAction::Profile {
                name,
                email,
                phone,
                address,
            } => {
                let update = eclat_core::UserUpdate {
                    name,
                    email,
                    phone,
                    address,
                };
                commands::auth::profile(&mut state, &update)?;
            }
        },
        Commands::Checkout(args) => commands::checkout::run(&mut state, args.into()).await?,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&state),
            OrdersAction::Show { id } => commands::orders::show(&state, &id)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Orders { status, search } => {
                commands::admin::orders(&state, status, search);
            }
            AdminAction::Summary => commands::admin::summary(&state),
        },
    }
    Ok(())
}

impl From<CheckoutArgs> for commands::checkout::CheckoutOptions {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            country: args.country,
            method: args.method,
            address: args.address,
            phone: args.phone,
            instructions: args.instructions,
            notify_email: args.notify_email,
            notify_sms: args.sms,
            gift_wrap: args.gift_wrap,
            promo: args.promo,
            payment: args.payment,
            quote_only: args.quote_only,
        }
    }
}
