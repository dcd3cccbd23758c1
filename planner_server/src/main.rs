use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use planner_core::{Catalog, Config};
use planner_server::{build_app, AppState};
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "workout-planner")]
#[command(about = "Personalized workout plan service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the exercise catalog CSV path
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Override the classifier model path
    #[arg(long, global = true)]
    model: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the plan API (default)
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:5000
        #[arg(long)]
        bind: Option<String>,
    },

    /// Load and validate the exercise catalog
    CheckCatalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    planner_core::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };
    if let Some(catalog) = cli.catalog {
        config.data.catalog_path = catalog;
    }
    if let Some(model) = cli.model {
        config.data.model_path = model;
    }

    match cli.command {
        Some(Commands::Serve { bind }) => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            cmd_serve(config).await
        }
        Some(Commands::CheckCatalog) => cmd_check_catalog(&config),
        None => cmd_serve(config).await,
    }
}

async fn cmd_serve(config: Config) -> Result<()> {
    info!(
        "Starting workout-planner v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = AppState::load(&config);
    if !state.model_loaded() || state.catalog.is_none() {
        warn!("Plan generation unavailable until model and catalog load");
    }

    let app = build_app(state, config.server.cors_permissive);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind))?;
    info!("Listening on http://{}", config.server.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn cmd_check_catalog(config: &Config) -> Result<()> {
    let path = &config.data.catalog_path;
    let catalog = Catalog::load_from(path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;

    println!("Catalog: {}", path.display());
    println!("  {} exercises", catalog.len());
    for (workout_type, count) in catalog.count_by_type() {
        println!("  {:<20} {}", workout_type, count);
    }

    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("catalog has {} problem(s)", errors.len());
    }

    println!("✓ Catalog is valid");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
