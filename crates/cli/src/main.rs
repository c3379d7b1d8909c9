//! KronosTech CLI - operator tools over the storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the token is kept under KRONOS_STATE_DIR, default ./.kronos)
//! kronos login ana@example.com --password secret
//!
//! # Inspect the cart of the signed-in user
//! kronos cart show
//!
//! # Pull site settings from the backend and change one
//! kronos config sync
//! kronos config set tax_rate 0.18
//!
//! # Recent audit events
//! kronos logs list --level error --limit 20
//! ```
//!
//! # Commands
//!
//! - `login`, `logout`, `whoami` - Session management
//! - `cart` - Show, add to, or clear the cart
//! - `config` - Site configuration
//! - `logs` - Audit log
//! - `orders` - Order management
//! - `search` - Local search history
//! - `theme` - Local color scheme preference

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command output goes to stdout.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use kronos_client::{ClientConfig, ClientStorage, FileStorage, Storefront};
use kronos_core::LogLevel;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

use error::CliError;

/// State directory used when `KRONOS_STATE_DIR` is unset.
const DEFAULT_STATE_DIR: &str = ".kronos";

#[derive(Debug, Parser)]
#[command(name = "kronos")]
#[command(author, version, about = "KronosTech storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and keep the session token
    Login {
        email: String,

        #[arg(long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Shopping cart of the signed-in user
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Site configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Audit log
    Logs {
        #[command(subcommand)]
        action: LogsAction,
    },
    /// Order management
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Local search history
    Search {
        #[command(subcommand)]
        action: SearchAction,
    },
    /// Local color scheme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Debug, Subcommand)]
enum CartAction {
    /// List cart lines and totals
    Show,
    /// Add a product variant
    Add {
        /// Product variant ID
        variant_id: i32,

        #[arg(short, long, default_value_t = 1)]
        quantity: i32,
    },
    /// Remove every line
    Clear,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,
    /// Refresh settings from the backend
    Sync,
    /// Change one setting and save it
    Set { key: String, value: String },
    /// Restore built-in defaults locally
    Reset,
}

#[derive(Debug, Subcommand)]
enum LogsAction {
    /// List audit events, newest first
    List {
        #[arg(long)]
        level: Option<LogLevel>,

        #[arg(long)]
        module: Option<String>,

        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Delete every audit event
    Clear,
}

#[derive(Debug, Subcommand)]
enum OrdersAction {
    /// List orders
    List {
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        payment_status: Option<String>,

        #[arg(long)]
        search: Option<String>,
    },
    /// Show one order with its lines
    Show { id: i32 },
}

#[derive(Debug, Subcommand)]
enum SearchAction {
    /// Remember a search term
    Add { term: String },
    /// List remembered terms
    List,
    /// Forget every term
    Clear,
}

#[derive(Debug, Subcommand)]
enum ThemeAction {
    /// Print the active theme
    Show,
    /// Switch between light and dark
    Toggle,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kronos_cli=info,kronos_client=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let app = open()?;

    match cli.command {
        Commands::Login { email, password } => commands::session::login(&app, email, password).await?,
        Commands::Logout => commands::session::logout(&app).await,
        Commands::Whoami => commands::session::whoami(&app).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&app).await?,
            CartAction::Add { variant_id, quantity } => commands::cart::add(&app, variant_id, quantity).await?,
            CartAction::Clear => commands::cart::clear(&app).await?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&app),
            ConfigAction::Sync => commands::config::sync(&app).await,
            ConfigAction::Set { key, value } => commands::config::set(&app, &key, value).await?,
            ConfigAction::Reset => commands::config::reset(&app),
        },
        Commands::Logs { action } => match action {
            LogsAction::List { level, module, limit } => commands::logs::list(&app, level, module, limit).await,
            LogsAction::Clear => commands::logs::clear(&app).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List {
                status,
                payment_status,
                search,
            } => commands::orders::list(&app, status, payment_status, search).await,
            OrdersAction::Show { id } => commands::orders::show(&app, id).await?,
        },
        Commands::Search { action } => match action {
            SearchAction::Add { term } => commands::prefs::add_search(&app, &term),
            SearchAction::List => commands::prefs::list_searches(&app),
            SearchAction::Clear => commands::prefs::clear_searches(&app),
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::prefs::show_theme(&app),
            ThemeAction::Toggle => commands::prefs::toggle_theme(&app),
        },
    }
    Ok(())
}

/// Client context backed by the state directory.
fn open() -> Result<Storefront, CliError> {
    let config = ClientConfig::from_env()?;
    let dir = config
        .state_dir
        .clone()
        .unwrap_or_else(|| DEFAULT_STATE_DIR.into());
    tracing::debug!(state_dir = %dir.display(), api = %config.base_url(), "Opening client state");

    let storage = ClientStorage::new(FileStorage::new(dir));
    Ok(Storefront::new(&config, storage))
}
