//! roster-server binary.
//!
//! Serves the record API over HTTP. Settings come from `config.toml` (or
//! `--config`), overridden by `ROSTER_HOST`, `ROSTER_PORT` and
//! `ROSTER_STORE_PATH`.
//!
//! `--hash-password` reads one line from stdin and prints its argon2 hash,
//! for seeding records by hand.

use std::{io, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_server::{AppState, ServerConfig, auth::hash_password};
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster record server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash of a password read from stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

fn load_config(path: PathBuf) -> anyhow::Result<ServerConfig> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "roster.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context("invalid configuration")
}

fn print_hash() -> anyhow::Result<()> {
  eprint!("Password: ");
  let password = io::stdin().lines().next().transpose()?.unwrap_or_default();
  println!("{}", hash_password(&password).context("failed to hash password")?);
  Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  if cli.hash_password {
    return print_hash();
  }

  let cfg = load_config(cli.config)?;
  let store_path = cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = roster_server::router(AppState { store: Arc::new(store) });

  let address = cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!(%address, store = ?store_path, "roster-server listening");

  axum::serve(listener, app).await.context("server error")
}
