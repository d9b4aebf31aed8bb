use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::{info, warn};
use warp::Filter;

use travel_orchestrator::agent_cli::AgentCli;
use travel_orchestrator::agents::orchestrator::DEFAULT_USER;
use travel_orchestrator::config::Config;
use travel_orchestrator::error::handle_rejection;
use travel_orchestrator::formatter::render_markdown;
use travel_orchestrator::memory::{InMemoryStore, RedisStore, SharedStore};
use travel_orchestrator::{api, middleware, TravelOrchestrator};

#[derive(Parser)]
#[command(name = "travel-orchestrator", about = "Travel planning agent orchestrator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Plan a trip from a `{"prompt": ...}` payload and print the result
    Invoke {
        payload: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        #[arg(long, default_value = DEFAULT_USER)]
        user_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { port } => serve(config, port).await,
        Command::Invoke {
            payload,
            format,
            user_id,
        } => invoke(&payload, format, &user_id).await,
    }
}

async fn serve(config: Config, port: Option<u16>) -> anyhow::Result<()> {
    info!("Starting Travel Planner Orchestrator");

    // Preference store lives for the whole process
    let store: SharedStore = match &config.redis_url {
        Some(url) => {
            let store = RedisStore::new(url, config.preferences_ttl_secs).await?;
            info!("Redis preference store connected");
            Arc::new(store)
        }
        None => {
            warn!("REDIS_URL not set, keeping preferences in memory");
            Arc::new(InMemoryStore::new())
        }
    };

    let orchestrator = Arc::new(TravelOrchestrator::new(store));
    let agent_cli = AgentCli::from_command_line(&config.agent_command, config.agent_timeout)
        .context("AGENT_CLI is empty")?;
    info!("Agent CLI: {:?}", config.agent_command);

    let api_routes = api::routes(orchestrator, Arc::new(agent_cli)).with(warp::log("api"));

    let routes = api::health()
        .or(api::prometheus_metrics())
        .or(api_routes)
        .or(api::ui(config.static_dir.clone()))
        .recover(handle_rejection)
        .with(middleware::cors());

    let port = port.unwrap_or(config.port);
    let addr = ([0, 0, 0, 0], port);
    info!("Server listening on {}", port);

    warp::serve(routes).run(addr).await;

    Ok(())
}

/// Single-shot pipeline run; stdout carries only the result so callers can parse it.
async fn invoke(payload: &str, format: OutputFormat, user_id: &str) -> anyhow::Result<()> {
    let payload: Value = serde_json::from_str(payload).context("payload must be JSON")?;
    let prompt = payload
        .get("prompt")
        .and_then(Value::as_str)
        .unwrap_or("Plan a trip to Munich");

    let orchestrator = TravelOrchestrator::new(Arc::new(InMemoryStore::new()));
    match orchestrator.invoke(prompt, user_id).await {
        Ok(outcome) => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
            OutputFormat::Markdown => println!("{}", render_markdown(&outcome.trip_plan)),
        },
        Err(e) => {
            let failure = serde_json::json!({
                "error": format!("Failed to generate trip plan: {}", e),
                "message":
                    "Sorry, I encountered an error while planning your trip. Please try again.",
            });
            println!("{}", failure);
        }
    }

    Ok(())
}
