//! usergql CLI - serve and inspect the user GraphQL endpoint

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use usergql::config::{self, UsergqlConfig};
use usergql::{build_schema, graphql, server, ui, SharedStore, SqliteStore, UserStore};

#[derive(Parser)]
#[command(name = "usergql")]
#[command(version)]
#[command(about = "Typed GraphQL query endpoint over a relational user store")]
#[command(long_about = r#"
usergql serves `POST /graphql` with a single root query:

  { usersByName(name: "Ann") { id name age profession friendly } }

Example usage:
  usergql init
  usergql serve --database users.db
  usergql lookup --name Ann
  usergql schema > schema.graphql
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./usergql.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GraphQL server
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        listen: Option<SocketAddr>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Maximum pooled connections
        #[arg(short, long)]
        pool_size: Option<usize>,

        /// Create the users table if it does not exist
        #[arg(long)]
        create_schema: bool,
    },

    /// Print the GraphQL schema (SDL)
    Schema,

    /// Look up users by exact name directly against the store
    Lookup {
        /// Name to match
        #[arg(short, long)]
        name: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { listen, database, pool_size, create_schema } => {
            let mut config = resolve_config(cli.config.as_deref())?;
            if let Some(listen) = listen {
                config.server.listen = listen;
            }
            if let Some(database) = database {
                config.database.path = database;
            }
            if let Some(pool_size) = pool_size {
                config.database.pool_size = pool_size;
            }
            config.database.create_schema |= create_schema;
            config.validate()?;

            let store = open_store(&config).await?;
            let schema = build_schema(store, config.server.max_query_depth);

            ui::header("usergql");
            ui::info("Database", &config.database.path.display().to_string());
            ui::info("Endpoint", &format!("http://{}/graphql", config.server.listen));

            server::start_server(config.server.listen, schema).await?;
        }

        Commands::Schema => {
            print!("{}", graphql::sdl());
        }

        Commands::Lookup { name, database, format } => {
            let mut config = resolve_config(cli.config.as_deref())?;
            if let Some(database) = database {
                config.database.path = database;
            }
            config.validate()?;

            let store = open_store(&config).await?;
            let users = store.find_by_name(&name).await?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else if users.is_empty() {
                ui::error(&format!("No users named {:?}", name));
            } else {
                println!("{} {} match(es) for {:?}", ui::Icons::PERSON, users.len(), name);
                println!("{}", ui::users_table(&users));
            }
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &UsergqlConfig::default(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

fn resolve_config(path: Option<&Path>) -> anyhow::Result<UsergqlConfig> {
    match (config::load_config(path)?, path) {
        (Some(config), _) => Ok(config),
        (None, Some(path)) => anyhow::bail!("config file not found: {}", path.display()),
        (None, None) => Ok(UsergqlConfig::default()),
    }
}

async fn open_store(config: &UsergqlConfig) -> anyhow::Result<SharedStore> {
    let store = SqliteStore::connect(&config.database)
        .await
        .with_context(|| format!("cannot use database {}", config.database.path.display()))?;
    Ok(Arc::new(store))
}
