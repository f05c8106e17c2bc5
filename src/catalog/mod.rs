pub mod client;
pub mod config;

pub use client::CatalogClient;
pub use config::CatalogConfig;
