use clap::Parser;
use gazette::client::ContentClient;
use gazette::config::StudioConfig;
use gazette::server::{AppState, router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "Server-rendered article and event site backed by a hosted content store")]
#[command(long_about = "\
Server-rendered article and event site backed by a hosted content store

Fetches article and event records from the configured content project and
serves two pages:

  GET /                   article and event listings
  GET /articles/{slug}    article detail (404 when the slug matches nothing)

Connection settings identify the content project. Passing --use-cdn reads
from the cached edge endpoint; without it every query fetches fresh.")]
#[command(version = version_string())]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "GAZETTE_ADDR", default_value = "0.0.0.0:3000")]
    addr: String,

    /// Content project id
    #[arg(long, env = "GAZETTE_PROJECT_ID")]
    project_id: String,

    /// Content dataset name
    #[arg(long, env = "GAZETTE_DATASET", default_value = "production")]
    dataset: String,

    /// Date-pinned query API version
    #[arg(long, env = "GAZETTE_API_VERSION", default_value = "2024-01-01")]
    api_version: String,

    /// Read from the cached edge endpoint instead of the live API
    #[arg(long, env = "GAZETTE_USE_CDN")]
    use_cdn: bool,

    /// Revalidation window in seconds, advertised via Cache-Control
    #[arg(long, env = "GAZETTE_REVALIDATE", default_value_t = 60)]
    revalidate: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gazette=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = StudioConfig {
        project_id: cli.project_id,
        dataset: cli.dataset,
        api_version: cli.api_version,
        use_cdn: cli.use_cdn,
        revalidate_secs: cli.revalidate,
    };
    let client = ContentClient::new(&config)?;
    tracing::info!("content endpoint: {}", client.base_url());

    let app = router(AppState::new(config, client));

    tracing::info!("listening on {}", cli.addr);
    let listener = tokio::net::TcpListener::bind(&cli.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
