use anyhow::Result;
use clap::Parser;
use gemini_prompt_proxy::app::App;
use gemini_prompt_proxy::models::Config;
use std::net::{IpAddr, SocketAddr};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-prompt-proxy")]
#[command(about = "Proxy prompts to the Gemini API with a server-held key")]
struct CliArgs {
    /// Address to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_prompt_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gemini-prompt-proxy");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app = App::new(&config);
    let addr = SocketAddr::new(args.host, args.port);

    if let Err(e) = app.run(addr).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
