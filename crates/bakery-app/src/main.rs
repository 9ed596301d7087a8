use bakery_hex::application::bakery_service::BakeryService;
use bakery_hex::config::Config;
use bakery_hex::inbound::http::{HttpServer, HttpServerConfig};
use bakery_repo::seed::seed_demo_data;
use bakery_repo::{build_repo, Repo};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for DATABASE_URL / SERVER_PORT / SEED_DEMO_DATA when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let repo: Repo = build_repo(config.database_url.as_deref()).await?;
    tracing::info!(backend = repo.backend(), "repository ready");

    if config.seed_demo_data {
        let inserted = seed_demo_data(&repo).await?;
        tracing::info!(inserted, "demo data seeded");
    }

    let service = BakeryService::new(repo);

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(service, server_cfg).await?;
    http.run().await
}
