//! CLI command implementations
//!
//! `serve` resolves configuration, builds the single shared store handle and
//! runs the HTTP server on a tokio runtime. `ping` is a one-shot connectivity
//! check against the same store settings.

use std::sync::Arc;

use serde_json::json;

use crate::http_server::HttpServer;
use crate::observability::{init_tracing, log_event, log_event_with_fields, Event};
use crate::students::{MemoryStudentStore, MongoStudentStore, StoreConfig, StudentStore};

use super::args::{Command, ServeArgs, StoreArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Loads `.env`, parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(args),
        Command::Ping(store) => ping(&store),
    }
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

async fn connect(config: &StoreConfig) -> CliResult<MongoStudentStore> {
    MongoStudentStore::connect(config)
        .await
        .map_err(|e| CliError::boot_failed(format!("Failed to connect to MongoDB: {}", e)))
}

/// Start the HTTP server
///
/// 1. Resolve store settings (missing `url` aborts startup)
/// 2. Build the shared store handle
/// 3. Serve until Ctrl-C / SIGTERM
pub fn serve(args: ServeArgs) -> CliResult<()> {
    init_tracing(&args.log_level);
    log_event(Event::BootStart);

    let store_config = if args.in_memory {
        None
    } else {
        match args.store.store_config() {
            Ok(config) => Some(config),
            Err(e) => {
                log_event(Event::StartupFailed);
                return Err(e);
            }
        }
    };

    let http_config = args.http_config();
    let addr = http_config.socket_addr();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", addr.as_str()),
            ("backend", if args.in_memory { "memory" } else { "mongodb" }),
        ],
    );

    let rt = runtime()?;
    rt.block_on(async {
        let store: Arc<dyn StudentStore> = match &store_config {
            Some(config) => {
                let store = connect(config).await.map_err(|e| {
                    log_event(Event::StartupFailed);
                    e
                })?;
                log_event_with_fields(
                    Event::StoreConnected,
                    &[
                        ("database", config.database.as_str()),
                        ("collection", config.collection.as_str()),
                    ],
                );
                Arc::new(store)
            }
            None => {
                log_event_with_fields(Event::StoreConnected, &[("backend", "memory")]);
                Arc::new(MemoryStudentStore::new())
            }
        };

        HttpServer::new(http_config, store)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Ping the configured database and print `{"ok": true}`
pub fn ping(store: &StoreArgs) -> CliResult<()> {
    init_tracing("warn");
    let config = store.store_config()?;

    let rt = runtime()?;
    rt.block_on(async {
        let store = connect(&config).await?;
        store
            .ping()
            .await
            .map_err(|e| CliError::boot_failed(format!("Ping failed: {}", e)))
    })?;

    write_response(json!({
        "ok": true,
        "database": config.database,
        "collection": config.collection,
    }))
}
