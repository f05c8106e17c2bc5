// Route configuration for the storefront frontend.

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(handlers::health_check))
        // Error page the access gate redirects to
        .route("/404", web::get().to(handlers::not_found_page))
        // Catalog pages
        .route("/category/{slug}", web::get().to(handlers::category_page))
        .route(
            "/product/{slug}/related",
            web::get().to(handlers::related_products),
        )
        // Account routes (protected by the access gate)
        .service(
            web::scope("/tai-khoan")
                .route("", web::get().to(handlers::account_page))
                .route("/{tail:.*}", web::get().to(handlers::account_page)),
        );
}
