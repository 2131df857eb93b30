use anyhow::Context;
use clap::{Parser, Subcommand};
use filter_manager::{
    api::{build_router, AppState},
    build_managers,
    config::{Config, ObservabilityConfig},
    filter::{FilterRegistry, QueryParams},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "filter-manager", version)]
#[command(about = "Configuration-driven search filters over a document repository", long_about = None)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve,

    /// Validate the configuration and exit
    Check,

    /// Run one manager against a query string and print the JSON response
    Search {
        #[arg(value_name = "MANAGER")]
        manager: String,

        /// e.g. `color=red&price=10;50`
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
    },
}

fn init_tracing(observability: &ObservabilityConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("filter_manager={},tower_http=info", observability.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if observability.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.observability);

    tracing::info!("Starting filter manager v{}", env!("CARGO_PKG_VERSION"));

    let repositories = config
        .repositories()
        .context("Failed to open repositories")?;
    let registry = FilterRegistry::with_builtin();
    tracing::info!(types = ?registry.list_types(), "Filter types registered");

    let managers = build_managers(&config.filter_manager, &registry, &repositories)
        .context("Invalid filter manager configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Check => {
            tracing::info!(managers = managers.len(), "Configuration is valid");
            Ok(())
        }
        Commands::Search { manager, query } => {
            let manager = managers
                .get(&manager)
                .with_context(|| format!("Filter manager `{}` not found", manager))?;
            let response = manager.handle_request(&QueryParams::parse(&query)).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Commands::Serve => serve(&config, AppState::new(managers)).await,
    }
}

async fn serve(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);

    // Start HTTP server
    let http_addr = config.server.bind_address();
    let http_listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("Failed to bind {}", http_addr))?;
    tracing::info!("HTTP API server listening on http://{}", http_addr);

    tokio::select! {
        result = axum::serve(http_listener, app) => {
            if let Err(e) = result {
                tracing::error!("HTTP server error: {}", e);
                return Err(e.into());
            }
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
