use anyhow::Context;
use clap::Parser;
use plume_copilot::{router, CopilotConfig, CopilotProxy, OpenAiClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plume-copilot", about = "AI copilot proxy for the Plume editor")]
struct Args {
    /// Config file (defaults to plume.config.json in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the config file
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CopilotConfig::load_file(path)?,
        None => CopilotConfig::load(&std::env::current_dir()?)?,
    };
    let mut config = config.with_api_key(std::env::var("OPENAI_API_KEY").ok());
    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    if config.api_key.is_none() {
        info!("no fallback API key configured, requests must carry their own");
    }

    let client = OpenAiClient::new(config.base_url.clone());
    let proxy = Arc::new(CopilotProxy::new(client, &config));
    let app = router(proxy);

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(addr = %config.listen, model = %config.default_model, "copilot proxy listening");

    axum::serve(listener, app).await?;
    Ok(())
}
