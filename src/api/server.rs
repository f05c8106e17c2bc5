// HTTP server assembly using actix-web.

use crate::api::{access_gate::AccessGate, routes};
use crate::catalog::CatalogClient;
use actix_web::middleware::{Compress, Logger};
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::env;

pub struct ApiServer {
    pub host: String,
    pub port: u16,
    pub protected_prefix: String,
    pub access_token_key: Option<String>,
}

impl ApiServer {
    /// Create server from environment variables
    pub fn from_env() -> Result<Self> {
        crate::util::env::init_env();

        let host = env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("Invalid HTTP_PORT")?;

        let protected_prefix =
            env::var("PROTECTED_PREFIX").unwrap_or_else(|_| "/tai-khoan".to_string());

        // Optional: when set, the access gate verifies tokens instead of
        // only checking cookie presence.
        let access_token_key = crate::util::env::env_opt("ACCESS_TOKEN_KEY");

        Ok(Self {
            host,
            port,
            protected_prefix,
            access_token_key,
        })
    }

    /// Start the HTTP server
    pub async fn run(self, catalog: CatalogClient) -> Result<()> {
        let bind_addr = format!("{}:{}", self.host, self.port);

        tracing::info!(
            host = %self.host,
            port = %self.port,
            protected_prefix = %self.protected_prefix,
            token_verification = self.access_token_key.is_some(),
            "Starting storefront web server"
        );

        let catalog_data = web::Data::new(catalog);
        let protected_prefix = self.protected_prefix.clone();
        let access_token_key = self.access_token_key.clone();

        HttpServer::new(move || {
            let gate = AccessGate::new(protected_prefix.clone(), "/404")
                .with_verification_key(access_token_key.clone());

            App::new()
                .app_data(catalog_data.clone())
                .wrap(Logger::default())
                .wrap(Compress::default())
                .wrap(gate)
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}
