use clap::Parser;
use demotrack_core::DemotrackConfig;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "demotrack.toml")]
    config: String,

    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config
    let config = match DemotrackConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // Init logging: RUST_LOG wins, config level otherwise
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level));
    fmt().with_env_filter(filter).init();

    if args.health {
        println!("✅ Config loaded from {}", args.config);
        println!(
            "✅ HTTP API {} on {}:{}",
            if config.http.enabled { "enabled" } else { "disabled" },
            config.http.host,
            config.http.port
        );
        println!(
            "✅ Analytics: default duration {}m, success rating >= {}",
            config.analytics.default_duration_minutes, config.analytics.success_rating
        );
        return Ok(());
    }

    if !config.http.enabled {
        tracing::warn!("HTTP API disabled in {}; nothing to serve", args.config);
        return Ok(());
    }

    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    demotrack_server::http::start_http_server(config, tx.subscribe()).await?;

    Ok(())
}
