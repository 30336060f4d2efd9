//! CLI argument definitions using clap
//!
//! Commands:
//! - student-records serve [--in-memory] [--port <port>] ...
//! - student-records ping
//!
//! The MongoDB connection string is read from `--database-url` or the `url`
//! environment variable (a `.env` file is loaded first).

use clap::{Args, Parser, Subcommand};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::students::mongo::{StoreConfig, DEFAULT_COLLECTION, DEFAULT_DATABASE};

/// Message reported when no connection string is configured
pub const MISSING_URL: &str = "MongoDB connection URL not found in environment variables";

/// Student records service
#[derive(Parser, Debug)]
#[command(name = "student-records")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Check that the database answers and exit
    Ping(StoreArgs),
}

/// Store connection flags
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// MongoDB connection string
    #[arg(long = "database-url", env = "url", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database name
    #[arg(long, env = "STUDENTS_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Collection name
    #[arg(long, env = "STUDENTS_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,
}

impl StoreArgs {
    /// Resolve the MongoDB settings; a missing URL is fatal
    pub fn store_config(&self) -> CliResult<StoreConfig> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CliError::config_error(MISSING_URL))?;

        Ok(StoreConfig {
            url: url.to_string(),
            database: self.database.clone(),
            collection: self.collection.clone(),
        })
    }
}

/// Flags for `serve`
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Allowed CORS origin (repeatable); none allows any origin
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Keep records in process memory instead of MongoDB
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["student-records", "serve", "--in-memory"]).unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };

        assert!(args.in_memory);
        assert_eq!(args.port, 8000);
        assert_eq!(args.store.database, "CosmoCloud");
        assert_eq!(args.store.collection, "Student");
        assert_eq!(args.http_config().socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_store_config_from_flag() {
        let cli = Cli::try_parse_from([
            "student-records",
            "ping",
            "--database-url",
            "mongodb://localhost:27017",
            "--collection",
            "Pupils",
        ])
        .unwrap();
        let Command::Ping(store) = cli.command else {
            panic!("expected ping");
        };

        let config = store.store_config().unwrap();
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.collection, "Pupils");
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let args = StoreArgs {
            database_url: None,
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        };

        let err = args.store_config().unwrap_err();
        assert_eq!(err.code_str(), "CLI_CONFIG_ERROR");
        assert_eq!(err.message(), MISSING_URL);
    }

    #[test]
    fn test_repeated_cors_origins() {
        let cli = Cli::try_parse_from([
            "student-records",
            "serve",
            "--cors-origin",
            "http://a.test",
            "--cors-origin",
            "http://b.test",
        ])
        .unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.cors_origins.len(), 2);
    }
}
