use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::cli::{self, Cli, Commands, ProfileAction};
use storefront::{config, storage, ApiClient, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Login { email, password } => {
            let (store, api) = context()?;
            cli::commands::login(&store, &api, &email, password).await
        }
        Commands::Register {
            name,
            email,
            password,
            details,
        } => {
            let (store, api) = context()?;
            cli::commands::register(&store, &api, &name, &email, password, details).await
        }
        Commands::Logout => {
            let (store, _) = context()?;
            cli::commands::logout(&store).await
        }
        Commands::Status { format } => {
            let (store, _) = context()?;
            cli::commands::status(&store, format).await
        }
        Commands::Profile { action } => {
            let (store, api) = context()?;
            match action {
                ProfileAction::Show { format } => {
                    cli::commands::profile_show(&store, &api, format).await
                }
                ProfileAction::Update { details } => {
                    cli::commands::profile_update(&store, &api, details).await
                }
            }
        }
    }
}

/// Load config and build the session store and API client every command shares
fn context() -> Result<(SessionStore, ApiClient)> {
    let config = config::load_config_or_default()?;
    let store = SessionStore::new(storage::from_config(&config.storage));
    let api = ApiClient::new(&config.api)?;
    Ok((store, api))
}
