//! Creators Corner CLI - Session management and content browsing.
//!
//! # Usage
//!
//! ```bash
//! # Log in (password from -p or DIRECTUS_PASSWORD)
//! cc-cli login -e maker@example.com
//!
//! # Who is logged in, and how long the session lasts
//! cc-cli whoami
//! cc-cli status
//!
//! # Renew the access token early
//! cc-cli refresh
//!
//! # Browse a collection
//! cc-cli items works --limit 10
//!
//! # End the session
//! cc-cli logout
//! ```
//!
//! # Environment Variables
//!
//! - `DIRECTUS_URL` - Directus instance (required)
//! - `DIRECTUS_PASSWORD` - Password for `login` when `-p` is omitted
//! - `CC_LOG_FORMAT` - `json` for structured log lines
//! - `RUST_LOG` - Log filter (default: `info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::items::CollectionArg;

#[derive(Parser)]
#[command(name = "cc-cli")]
#[command(author, version, about = "Creators Corner CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "DIRECTUS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the session, locally and on the server
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show the stored session without contacting the server
    Status,
    /// Exchange the refresh token for a new token pair
    Refresh,
    /// List items of a collection
    Items {
        /// Collection to read
        #[arg(value_enum)]
        collection: CollectionArg,

        /// Maximum number of items
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let is_json = std::env::var("CC_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads env-backed arguments
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let session = commands::open_session()?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&session, &email, password).await?;
        }
        Commands::Logout => commands::auth::logout(&session).await?,
        Commands::Whoami => commands::auth::whoami(&session).await?,
        Commands::Status => commands::auth::status(&session),
        Commands::Refresh => commands::auth::refresh(&session).await?,
        Commands::Items { collection, limit } => {
            commands::items::list(&session, collection, limit).await?;
        }
    }
    Ok(())
}
