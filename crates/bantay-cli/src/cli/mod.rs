//! CLI entry and dispatch.

use anyhow::{Context, Result};
use bantay_core::config;
use clap::Parser;

use crate::logging::{self, LogLevel};

mod commands;
mod prompt;

#[derive(Parser)]
#[command(name = "bantay")]
#[command(version)]
#[command(about = "Bantay terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the service base URL from config
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Log verbosity (RUST_LOG takes precedence)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and open the view for your role
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, env = "BANTAY_EMAIL")]
        email: Option<String>,

        /// Read the password from the next line of stdin (the second line when
        /// the email is also read from stdin)
        #[arg(long)]
        password_stdin: bool,
    },

    /// Log out and clear the saved session
    Logout,

    /// Show the account behind the saved session
    Whoami,

    /// Show the view mapped to a path
    Route {
        /// Path such as /admin or /coast-guard
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level);

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        base_url,
        log_level: _,
    } = cli;

    // Route and config commands never touch the config file.
    let load_config = || -> Result<config::Config> {
        let mut config = config::Config::load().context("load config")?;
        config.apply_base_url_override(base_url.as_deref());
        tracing::debug!(base_url = %config.base_url, "config loaded");
        Ok(config)
    };

    match command {
        Commands::Login {
            email,
            password_stdin,
        } => commands::auth::login(&load_config()?, email, password_stdin).await,
        Commands::Logout => commands::auth::logout(&load_config()?).await,
        Commands::Whoami => commands::auth::whoami(&load_config()?).await,
        Commands::Route { path } => commands::route::show(&path),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
