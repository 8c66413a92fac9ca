//! folio - content resolver and admin client
//!
//! `folio resolve <resource>` prints the list a content screen would show:
//! live records when complete, otherwise merged over fixtures. The other
//! subcommands cover the admin side (login, validate, create/update,
//! delete).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_common::api::{Resource, TokenStore};
use folio_content::model::Section;
use folio_content::{fixtures, logging, validation, ApiClient, ContentScreen, ResolveOptions};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Command-line arguments for folio
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Hybrid content resolver and admin client for the Folio API")]
#[command(version)]
struct Args {
    /// Config file (default: FOLIO_CONFIG, then the per-user config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overriding config and FOLIO_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, normalize and merge a resource list, printing JSON
    Resolve {
        /// articles, research, shop, collected, tot, tot-meta
        resource: Resource,

        /// Only records in this section
        #[arg(long)]
        section: Option<String>,

        /// Fixture file replacing the bundled fixtures
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Show server data only, never fixtures
        #[arg(long)]
        no_fixtures: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Remove the stored session token
    Logout,

    /// Validate a JSON payload file without sending it
    Validate { resource: Resource, file: PathBuf },

    /// Create a record from a JSON file, or update it when --id is given
    Push {
        resource: Resource,
        file: PathBuf,

        #[arg(long)]
        id: Option<String>,
    },

    /// Delete a record by id
    Delete { resource: Resource, id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = logging::resolve_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }

    logging::init(&config.logging)?;
    info!("folio {} using API at {}", env!("CARGO_PKG_VERSION"), config.api_base_url);

    let token_store = TokenStore::new(config.token_path());
    let credentials = token_store
        .load()
        .context("Failed to read stored session token")?;

    match args.command {
        Command::Resolve {
            resource,
            section,
            fixtures: fixtures_path,
            no_fixtures,
            pretty,
        } => {
            let client = ApiClient::from_config(&config, credentials)?;
            let fixtures_path = fixtures_path.or_else(|| config.fixtures_path.clone());
            let fixture_records = if no_fixtures {
                Vec::new()
            } else {
                fixtures::for_resource(resource, fixtures_path.as_deref())
                    .context("Failed to load fixtures")?
            };

            let options = ResolveOptions {
                section: section.as_deref().map(Section::parse),
                fixture_fallback: !no_fixtures,
            };
            let screen = ContentScreen::new(
                Arc::new(client),
                resource,
                Arc::new(fixture_records),
                options,
            );

            screen.mount().await.await.context("Fetch task failed")?;
            let state = screen.state().await;
            if let Some(error) = &state.last_error {
                warn!("Server data unavailable: {}", error);
            }

            print_json(&state.articles, pretty)?;
        }

        Command::Login { email, password } => {
            let client = ApiClient::from_config(&config, credentials)?;
            let credentials = client.login(&email, &password).await?;
            token_store
                .save(&credentials)
                .context("Failed to store session token")?;
            println!("Logged in; token stored at {}", token_store.path().display());
        }

        Command::Logout => {
            token_store.clear().context("Failed to remove session token")?;
            println!("Logged out");
        }

        Command::Validate { resource, file } => {
            let payload = read_payload(&file)?;
            match validation::validate(resource, &payload) {
                Ok(()) => println!("{}: valid {} payload", file.display(), resource),
                Err(errors) => {
                    for error in &errors.errors {
                        eprintln!("{}: {}", error.field, error.message);
                    }
                    bail!("{}: {} validation error(s)", file.display(), errors.errors.len());
                }
            }
        }

        Command::Push { resource, file, id } => {
            if !credentials.is_authenticated() {
                warn!("No session token stored; run `folio login` first");
            }
            let client = ApiClient::from_config(&config, credentials)?;
            let payload = read_payload(&file)?;
            let saved = match id {
                Some(id) => client.update(resource, &id, &payload).await?,
                None => client.create(resource, &payload).await?,
            };
            print_json(&saved, true)?;
        }

        Command::Delete { resource, id } => {
            let client = ApiClient::from_config(&config, credentials)?;
            client.delete(resource, &id).await?;
            println!("Deleted {} {}", resource, id);
        }
    }

    Ok(())
}

fn read_payload(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}
