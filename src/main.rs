//! adventure-book server entry point.

use adventure_book::{
    config::{Cli, Command, Config, ProgressCommand},
    db::Database,
    library::{Catalog, ContentReader, integrity},
    server,
};
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };

    // Handle command
    match cli.command {
        Some(Command::Init { force }) => cmd_init(force).await,
        Some(Command::Check) => cmd_check(&config).await,
        Some(Command::Progress { action }) => cmd_progress(action, &config).await,
        Some(Command::Serve { bind }) => cmd_serve(config, bind).await,
        None => {
            // Default: start server
            cmd_serve(config, None).await
        }
    }
}

/// Load the catalog named in the config, or the embedded one.
fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let catalog = match &config.content.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::embedded()?,
    };
    Ok(catalog)
}

/// Initialize config and database.
async fn cmd_init(force: bool) -> anyhow::Result<()> {
    let config_path = PathBuf::from("config.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    // Write default config
    std::fs::write(&config_path, Config::generate_default())?;
    println!("Created config file: {}", config_path.display());

    // Initialize database
    let config = Config::default();
    let _db = Database::open(&config.database.path)?;
    println!("Initialized database: {}", config.database.path.display());

    println!("\nEdit config.toml to configure your server.");
    println!("Then run: adventure-book check");
    println!("And: adventure-book serve");

    Ok(())
}

/// Verify catalog and content.
async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    let reader = ContentReader::new(config.content.books_dir.clone());

    if catalog.is_empty() {
        anyhow::bail!("Catalog lists no books");
    }

    let issues = integrity::verify(&catalog, &reader);
    if issues.is_empty() {
        println!(
            "OK: {} books in {}",
            catalog.len(),
            reader.root().display()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("{}", issue);
    }
    anyhow::bail!("{} content issue(s) found", issues.len());
}

/// Progress management commands.
async fn cmd_progress(action: ProgressCommand, config: &Config) -> anyhow::Result<()> {
    let db = Database::open(&config.database.path)?;

    match action {
        ProgressCommand::List => {
            let progress = db.list_progress()?;
            if progress.is_empty() {
                println!("No saved progress.");
            } else {
                println!("{:<30} {:<16} {:>6}  SAVED", "BOOK", "SECTION", "HEALTH");
                println!("{}", "-".repeat(80));
                for p in progress {
                    let saved = chrono::DateTime::from_timestamp_millis(p.timestamp)
                        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    println!(
                        "{:<30} {:<16} {:>6}  {}",
                        p.book, p.section_id, p.health, saved
                    );
                }
            }
        }

        ProgressCommand::Clear { book } => {
            if db.delete_progress(&book)? {
                println!("Cleared progress for: {}", book);
            } else {
                println!("No saved progress for: {}", book);
            }
        }
    }

    Ok(())
}

/// Start the server.
async fn cmd_serve(mut config: Config, bind: Option<std::net::SocketAddr>) -> anyhow::Result<()> {
    // Override bind address if specified
    if let Some(addr) = bind {
        config.server.bind = addr;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adventure_book=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = load_catalog(&config)?;
    let db = Database::open(&config.database.path)?;

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.path.display(),
        books_dir = %config.content.books_dir.display(),
        books = catalog.len(),
        "Starting adventure-book server"
    );

    if catalog.is_empty() {
        tracing::warn!("Catalog lists no books; GET /books will return an empty list");
    }

    let state = server::AppState::new(config.clone(), db, catalog);

    // Content problems surface as 404/500 at request time; report them early
    for issue in integrity::verify(state.catalog(), state.reader()) {
        tracing::warn!(%issue, "Content issue");
    }

    let app = server::create_router(state);

    let listener = TcpListener::bind(config.server.bind).await?;
    tracing::info!(
        address = %config.server.bind,
        base_path = config.server.mount_path().as_deref().unwrap_or("/"),
        "Server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
