use anyhow::Result;
use clap::Parser;
use gemini_openai_gateway::models::Config;
use gemini_openai_gateway::server::{self, AppState};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-openai-gateway")]
#[command(about = "Serve an OpenAI-compatible chat completions API backed by Gemini")]
struct CliArgs {
    /// Address to listen on. Overrides HOST.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on. Overrides PORT.
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_openai_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    if config.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; backend calls will be rejected upstream");
    }

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Listening on {} (model: {}, backend: {})",
        addr, config.gemini_model, config.gemini_base_url
    );

    if let Err(e) = server::serve(listener, AppState::from_config(&config)).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Gateway stopped");
    Ok(())
}
