//! # Stellar Burgers CLI
//!
//! Command-line front-end over the burger client store.
//!
//! ## Module Organization
//! ```text
//! burger_cli/
//! ├── lib.rs            ◄─── You are here (argument parsing, tracing, dispatch)
//! ├── commands/
//! │   ├── mod.rs        ◄─── Shared helpers (auth gate, output)
//! │   ├── catalog.rs    ◄─── ingredients
//! │   ├── feed.rs       ◄─── feed
//! │   ├── order.rs      ◄─── order show / history / create
//! │   └── auth.rs       ◄─── login, register, logout, whoami, profile, password
//! └── error.rs          ◄─── CliError with machine-readable code
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (`RUST_LOG`, default `info,burger=debug`)
//! 2. Load `ClientConfig` (file → env → validate)
//! 3. Connect the `Store` (HTTP API + on-disk session)
//! 4. Run the subcommand

pub mod commands;
pub mod error;

use std::path::PathBuf;

use burger_client::{ClientConfig, Store};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::auth::{PasswordCommand, ProfileArgs};
use commands::order::OrderCommand;
use error::{CliError, CliResult};

#[derive(Parser, Debug)]
#[command(name = "burger")]
#[command(version, about = "Order space burgers from the Stellar Burgers kitchen")]
#[command(long_about = r#"Order space burgers from the Stellar Burgers kitchen.

EXAMPLES:
    # Browse the catalog
    burger ingredients
    burger ingredients --kind bun

    # Watch the kitchen
    burger feed
    burger order show 34512

    # Sign in and order
    burger login --email me@example.com --password secret
    burger order create --bun 643d69a5c3f7b9001cfa093c \
        --filling 643d69a5c3f7b9001cfa0941 --filling 643d69a5c3f7b9001cfa0945
    burger order history

ENVIRONMENT:
    BURGER_API_URL               API root (default https://norma.nomoreparties.space/api)
    BURGER_ACCESS_TOKEN_MAX_AGE  Access token lifetime in seconds (default 1200)
    BURGER_CREDENTIALS_PATH      Session file location
    RUST_LOG                     Log filter (default info,burger=debug)
"#)]
pub struct Cli {
    /// Path to client.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the ingredient catalog
    Ingredients {
        /// Only this category: bun, main or sauce
        #[arg(long, value_name = "KIND")]
        kind: Option<String>,
    },

    /// Show the public order feed
    Feed,

    /// Look up, list or place orders
    #[command(subcommand)]
    Order(OrderCommand),

    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BURGER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "BURGER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Change name, email or password
    Profile(ProfileArgs),

    /// Recover a forgotten password
    #[command(subcommand)]
    Password(PasswordCommand),
}

impl Command {
    /// Subcommand name for logs. Arguments are left out: some are passwords.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ingredients { .. } => "ingredients",
            Command::Feed => "feed",
            Command::Order(_) => "order",
            Command::Login { .. } => "login",
            Command::Register { .. } => "register",
            Command::Logout => "logout",
            Command::Whoami => "whoami",
            Command::Profile(_) => "profile",
            Command::Password(_) => "password",
        }
    }
}

/// Parses arguments, runs the command, and reports errors.
///
/// Returns the process exit code.
pub async fn run() -> std::process::ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let json = cli.json;

    match execute(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            // --json errors go to stdout with the rest of the output.
            if json {
                println!("{}", render_error(&err, true));
            } else {
                eprintln!("{}", render_error(&err, false));
            }
            std::process::ExitCode::FAILURE
        }
    }
}

fn render_error(err: &CliError, json: bool) -> String {
    if json {
        if let Ok(body) = serde_json::to_string(err) {
            return body;
        }
    }
    format!("error {}", err)
}

async fn execute(cli: Cli) -> CliResult<()> {
    let config = ClientConfig::load(cli.config)?;
    debug!(api = %config.base_url, "Configuration loaded");
    let store = Store::connect(config)?;
    let out = commands::Output::new(cli.json);

    info!(command = cli.command.name(), "Running command");
    match cli.command {
        Command::Ingredients { kind } => commands::catalog::ingredients(&store, &out, kind).await,
        Command::Feed => commands::feed::feed(&store, &out).await,
        Command::Order(command) => commands::order::run(&store, &out, command).await,
        Command::Login { email, password } => {
            commands::auth::login(&store, &out, email, password).await
        }
        Command::Register {
            name,
            email,
            password,
        } => commands::auth::register(&store, &out, name, email, password).await,
        Command::Logout => commands::auth::logout(&store, &out).await,
        Command::Whoami => commands::auth::whoami(&store, &out).await,
        Command::Profile(args) => commands::auth::profile(&store, &out, args).await,
        Command::Password(command) => commands::auth::password(&store, &out, command).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,burger=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_order_create() {
        let cli = Cli::try_parse_from([
            "burger", "order", "create", "--bun", "b1", "--filling", "m1", "--filling", "s1",
        ])
        .unwrap();

        match cli.command {
            Command::Order(OrderCommand::Create { bun, filling }) => {
                assert_eq!(bun, "b1");
                assert_eq!(filling, vec!["m1".to_string(), "s1".to_string()]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["burger", "feed", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Feed));
    }

    #[test]
    fn test_render_error_as_json() {
        let err = CliError::from(burger_client::ClientError::NotAuthenticated);

        let body = render_error(&err, true);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["code"], "NOT_AUTHENTICATED");
        assert!(value["message"].is_string());
        assert!(render_error(&err, false).starts_with("error [NOT_AUTHENTICATED]"));
    }

    #[test]
    fn test_order_show_requires_number() {
        assert!(Cli::try_parse_from(["burger", "order", "show"]).is_err());
        assert!(Cli::try_parse_from(["burger", "order", "show", "abc"]).is_err());
    }
}
