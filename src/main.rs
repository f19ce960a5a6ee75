use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chapelco_weather::config::{initialize_app_state, Settings};
use chapelco_weather::router::create_router;

#[derive(Debug, Parser)]
#[command(name = "chapelco-weather", about = "Chapelco weather station API server")]
struct Args {
    /// Address to bind the server to
    #[arg(long)]
    bind: Option<String>,

    /// URL of the station's published dbf table
    #[arg(long)]
    dbf_url: Option<String>,

    /// Minutes to keep the fetched table before refetching
    #[arg(long)]
    cache_minutes: Option<u64>,
}

/// Main entry point for the weather API server.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chapelco_weather=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Chapelco weather server starting up");

    let args = Args::parse();
    let mut settings = Settings::from_env();
    if let Some(bind) = args.bind {
        settings.bind_address = bind;
    }
    if let Some(url) = args.dbf_url {
        settings.dbf_url = url;
    }
    if let Some(minutes) = args.cache_minutes {
        settings.cache_minutes = minutes;
    }

    let state = initialize_app_state(&settings);
    let app = create_router(state);

    info!("Starting server on {}", settings.bind_address);
    let listener = TcpListener::bind(&settings.bind_address).await?;

    info!(
        "Weather API server running on http://{}",
        settings.bind_address
    );
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        settings.bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
