use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// REST backend for adventure books with reading progress.
#[derive(Parser, Debug, Clone)]
#[command(name = "adventure-book")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "ADVENTURE_BOOK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the server (default if no command given).
    Serve {
        /// Address to bind the server to.
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Verify that the catalog and the book content agree.
    Check,

    /// Saved progress management commands.
    Progress {
        /// Progress subcommand action.
        #[command(subcommand)]
        action: ProgressCommand,
    },

    /// Initialize database and create default config.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Progress management subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ProgressCommand {
    /// List saved progress for every book.
    List,

    /// Forget saved progress for a book.
    Clear {
        /// Book path (e.g. "the-prisoner.json").
        book: String,
    },
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Book content configuration.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Prefix the API is mounted under (e.g. "/service"). Empty mounts at the root.
    #[serde(default)]
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            base_path: String::new(),
        }
    }
}

impl ServerConfig {
    /// Normalized mount prefix: `None` for the root, otherwise `/segment[/...]`
    /// without a trailing slash.
    pub fn mount_path(&self) -> Option<String> {
        let trimmed = self.base_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(format!("/{}", trimmed))
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::new(
        std::net::IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        8080,
    )
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/progress.db")
}

/// Book content configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding one JSON document per book.
    #[serde(default = "default_books_dir")]
    pub books_dir: PathBuf,

    /// Catalog file overriding the built-in catalog.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            books_dir: default_books_dir(),
            catalog: None,
        }
    }
}

fn default_books_dir() -> PathBuf {
    PathBuf::from("assets/books")
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from("config.toml"),
            PathBuf::from("adventure-book.toml"),
            dirs::config_dir()
                .map(|p| p.join("adventure-book").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/adventure-book/config.toml"),
        ];

        candidates.into_iter().find(|p| p.exists())
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# adventure-book configuration

[server]
bind = "0.0.0.0:8080"
# Mount the API under a prefix, e.g. "/service" for the web frontend
# base_path = "/service"

[database]
# path = "/var/lib/adventure-book/progress.db"

[content]
# Directory with one JSON document per book
books_dir = "assets/books"
# Replace the built-in catalog with a JSON file
# catalog = "/etc/adventure-book/catalog.json"
"#
        .to_string()
    }
}
