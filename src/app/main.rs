//! `userdesk`: command-line front-end for the users API.
//!
//! One subcommand per screen: login, list, show, edit, delete, logout.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use userdesk::app::{
    self, AuthError, AuthState, Config, FileCredentialStore, OAuthSettings, SessionGatedClient,
};
use userdesk::shared::{ClientError, ConfigError, UserRecord, UserUpdate};

/// Manage users of the demo API.
#[derive(Parser, Debug)]
#[command(name = "userdesk", version, about = "Authenticated user management client")]
struct Cli {
    /// Settings file (default: <config dir>/userdesk/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// API base URL.
    #[arg(long = "api-url", global = true)]
    api_url: Option<String>,

    /// Credential file.
    #[arg(long = "credentials", global = true)]
    credentials: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", global = true)]
    timeout: Option<u64>,

    /// Print records as JSON.
    #[arg(long = "json", global = true)]
    json: bool,

    /// Verbose logging (debug level).
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Cache an OAuth access token. Prompts when --token is omitted.
    Login {
        #[arg(long)]
        token: Option<String>,
    },

    /// Forget the cached token.
    Logout,

    /// Report whether a token is cached.
    Whoami,

    /// List one page of users.
    Users {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show a single user.
    Show { id: i64 },

    /// Change a user's name. Omitted fields keep their current value.
    Edit {
        id: i64,
        #[arg(long = "first-name")]
        first_name: Option<String>,
        #[arg(long = "last-name")]
        last_name: Option<String>,
    },

    /// Delete a user.
    Delete {
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// 2 when a login is needed, 1 for every other failure
    fn exit_code(&self) -> u8 {
        match self {
            Self::Client(ClientError::AuthRequired) => 2,
            _ => 1,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(e, CliError::Client(ClientError::AuthRequired)) {
                eprintln!("Not logged in. Run `userdesk login`.");
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    let store = FileCredentialStore::new(config.credentials_path());

    match cli.command {
        Commands::Login { token } => {
            let token = match token {
                Some(token) => token,
                None => prompt_for_token(&config).await?,
            };
            app::login(&store, token.trim()).await?;
            println!("Logged in. Token saved to {}.", store.path().display());
        }
        Commands::Logout => {
            app::logout(&store).await?;
            println!("Logged out.");
        }
        Commands::Whoami => {
            if AuthState::from_store(&store).await.authenticated {
                match store.saved_at().await {
                    Some(at) => println!("Logged in (token saved {}).", at.to_rfc3339()),
                    None => println!("Logged in."),
                }
            } else {
                println!("Not logged in.");
            }
        }
        Commands::Users { page } => {
            let client = SessionGatedClient::new(config, store)?;
            let users = client.list_users(page).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else if users.is_empty() {
                println!("No users on page {}.", page);
            } else {
                for user in &users {
                    print_row(user);
                }
            }
        }
        Commands::Show { id } => {
            let client = SessionGatedClient::new(config, store)?;
            let user = client.get_user(id).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!("{}", user.full_name());
                println!("Email: {}", user.email);
                println!("ID: {}", user.id);
            }
        }
        Commands::Edit { id, first_name, last_name } => {
            if first_name.is_none() && last_name.is_none() {
                return Err(CliError::Usage(
                    "nothing to change: pass --first-name and/or --last-name".to_string(),
                ));
            }
            let client = SessionGatedClient::new(config, store)?;
            let update = match (first_name, last_name) {
                (Some(first), Some(last)) => UserUpdate::new(first, last),
                (first, last) => UserUpdate::merged(&client.get_user(id).await?, first, last),
            };
            client.update_user(id, &update).await?;
            println!("User {} updated.", id);
        }
        Commands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete user {}? [y/N] ", id)).await? {
                println!("Cancelled.");
                return Ok(());
            }
            let client = SessionGatedClient::new(config, store)?;
            client.delete_user(id).await?;
            println!("User {} deleted.", id);
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config, CliError> {
    let loaded = Config::load(cli.config.as_deref())?;
    let mut builder = loaded.app().to_builder();
    if let Some(url) = &cli.api_url {
        builder = builder.api_url(url.clone());
    }
    if let Some(path) = &cli.credentials {
        builder = builder.credentials_path(path.clone());
    }
    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    Ok(Config::with_builder(builder)?)
}

fn print_row(user: &UserRecord) {
    println!("{:>4}  {:<24}  {}", user.id, user.full_name(), user.email);
}

async fn read_line(prompt: &str) -> Result<String, CliError> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    Ok(lines.next_line().await?.unwrap_or_default())
}

async fn prompt_for_token(config: &Config) -> Result<String, CliError> {
    match config.oauth_client_id() {
        Some(client_id) => {
            let url = OAuthSettings::google(client_id).authorization_url()?;
            println!("Open this URL to sign in, then paste the access token:");
            println!("  {}", url);
        }
        None => println!("No OAuth client id configured; paste an access token."),
    }
    read_line("Access token: ").await
}

async fn confirm(prompt: &str) -> Result<bool, CliError> {
    let answer = read_line(prompt).await?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
