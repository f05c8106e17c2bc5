// HTTP request handlers for the storefront pages and JSON endpoints.

use crate::api::models::*;
use crate::catalog::CatalogClient;
use crate::components::{banner, escape_html, toast};
use actix_web::{web, HttpResponse, Result};
use serde_json::Value;
use std::time::SystemTime;

/// Health check endpoint
pub async fn health_check() -> Result<HttpResponse> {
    let uptime = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let response = ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: uptime,
    });

    Ok(HttpResponse::Ok().json(response))
}

/// Category landing page: breadcrumb plus attribute filters.
///
/// An absent breadcrumb (not-found or any backend failure, collapsed by the
/// catalog client) renders the not-found page; absent filters degrade to an
/// empty filter list on an otherwise normal page.
pub async fn category_page(
    path: web::Path<String>,
    catalog: web::Data<CatalogClient>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();

    let Some(breadcrumb) = catalog.fetch_breadcrumb(&slug).await else {
        tracing::info!(target: "pages", slug = %slug, "category not found");
        return Ok(not_found_response());
    };

    let filters = catalog
        .fetch_filter(&slug)
        .await
        .unwrap_or_else(|| Value::Array(Vec::new()));

    let body = render_category_page(&slug, &breadcrumb, &filters);
    Ok(html_response(HttpResponse::Ok(), body))
}

/// Related products for a product page, as JSON consumed by the page layer.
pub async fn related_products(
    path: web::Path<String>,
    catalog: web::Data<CatalogClient>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();

    match catalog.fetch_related_products(&slug).await {
        Some(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items))),
        None => Ok(HttpResponse::Ok()
            .json(ApiResponse::<Vec<Value>>::error("related products unavailable"))),
    }
}

/// Account page, reachable only through the access gate.
pub async fn account_page() -> Result<HttpResponse> {
    let main = r#"<section class="account"><h1>Tài khoản</h1><p>Quản lý đơn hàng và thông tin cá nhân.</p></section>"#;
    let body = page_shell("Tài khoản", &toast::render_host(main, &[]));
    Ok(html_response(HttpResponse::Ok(), body))
}

/// Error page the access gate redirects to; also used for absent categories.
pub async fn not_found_page() -> Result<HttpResponse> {
    Ok(not_found_response())
}

fn not_found_response() -> HttpResponse {
    let main = r#"<section class="not-found"><h1>404</h1><p>Không tìm thấy trang.</p><a href="/">Về trang chủ</a></section>"#;
    let body = page_shell("404", main);
    html_response(HttpResponse::NotFound(), body)
}

fn html_response(mut builder: actix_web::HttpResponseBuilder, body: String) -> HttpResponse {
    builder
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn page_shell(title: &str, main: &str) -> String {
    format!(
        "<!doctype html><html lang=\"vi\"><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>",
        escape_html(title),
        main
    )
}

fn render_category_page(slug: &str, breadcrumb: &Value, filters: &Value) -> String {
    let name = breadcrumb
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or(slug);

    let mut main = String::new();
    main.push_str(&banner::render(&banner::default_slides()));
    main.push_str(&format!(
        "<nav class=\"breadcrumb\"><a href=\"/\">Trang chủ</a> / <span>{}</span></nav>",
        escape_html(name)
    ));

    main.push_str("<aside class=\"filters\"><ul>");
    if let Some(items) = filters.as_array() {
        for item in items {
            let label = match item {
                Value::String(s) => s.clone(),
                Value::Object(map) => map
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                other => other.to_string(),
            };
            if !label.is_empty() {
                main.push_str(&format!("<li>{}</li>", escape_html(&label)));
            }
        }
    }
    main.push_str("</ul></aside>");

    page_shell(name, &toast::render_host(&main, &[]))
}
