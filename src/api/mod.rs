// HTTP serving layer for the storefront frontend.

pub mod access_gate;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
