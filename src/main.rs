use anyhow::Result;
use storefront_web::api::ApiServer;
use storefront_web::catalog::{CatalogClient, CatalogConfig};
use storefront_web::logging;
use storefront_web::util::env as env_util;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_util::init_env();
    logging::init_tracing("info")?;

    env_util::preflight_check(
        "storefront-web",
        &[],
        &[
            "API_BASE_URL",
            "BACKEND_BASE_URL",
            "HTTP_HOST",
            "HTTP_PORT",
            "PROTECTED_PREFIX",
            "ACCESS_TOKEN_KEY",
        ],
    )?;

    let config = CatalogConfig::from_env();
    info!(
        api_base_url = %config.api_base_url,
        backend_base_url = %config.backend_base_url,
        "catalog client configured"
    );
    let catalog = CatalogClient::new(config)?;

    let server = ApiServer::from_env()?;
    server.run(catalog).await
}
