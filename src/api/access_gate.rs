// Access gate middleware for the protected account routes.

use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::future::{ready, Ready};

/// Claims carried by the access token. Signature and expiry are checked by
/// `jsonwebtoken`; no custom claims are required.
#[derive(Debug, serde::Deserialize)]
struct AccessClaims {
    #[allow(dead_code)]
    exp: usize,
}

/// Middleware gating every route under a protected path prefix behind the
/// `accessToken` cookie.
///
/// With a verification key configured, the cookie value must be a valid
/// HS256 JWT with an unexpired `exp`. Without one, the gate degrades to a
/// presence check (cookie set with a non-empty value), which matches the
/// original storefront behavior but is not a security boundary on its own.
/// Failed checks redirect to the error route; everything else passes through
/// unchanged.
pub struct AccessGate {
    protected_prefix: String,
    redirect_to: String,
    verification_key: Option<String>,
}

impl AccessGate {
    pub fn new(protected_prefix: impl Into<String>, redirect_to: impl Into<String>) -> Self {
        Self {
            protected_prefix: protected_prefix.into(),
            redirect_to: redirect_to.into(),
            verification_key: None,
        }
    }

    pub fn with_verification_key(mut self, key: Option<String>) -> Self {
        self.verification_key = key.filter(|k| !k.trim().is_empty());
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service,
            protected_prefix: self.protected_prefix.clone(),
            redirect_to: self.redirect_to.clone(),
            verification_key: self.verification_key.clone(),
        }))
    }
}

pub struct AccessGateMiddleware<S> {
    service: S,
    protected_prefix: String,
    redirect_to: String,
    verification_key: Option<String>,
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Non-protected paths pass through untouched.
        if !req.path().starts_with(self.protected_prefix.as_str()) {
            let fut = self.service.call(req);
            return Box::pin(async move {
                let res = fut.await?;
                Ok(res.map_into_left_body())
            });
        }

        let cookie_header = req
            .headers()
            .get(header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("");
        let token = cookie_value(cookie_header, "accessToken");

        let authorized = match (self.verification_key.as_deref(), token.as_deref()) {
            (Some(key), Some(token)) => verify_access_token(token, key),
            (None, Some(token)) => !token.is_empty(),
            (_, None) => false,
        };

        if authorized {
            let fut = self.service.call(req);
            return Box::pin(async move {
                let res = fut.await?;
                Ok(res.map_into_left_body())
            });
        }

        tracing::info!(
            target: "access_gate",
            path = %req.path(),
            token_present = token.is_some(),
            "unauthenticated request redirected"
        );

        let location = self.redirect_to.clone();
        Box::pin(async move {
            let response = HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish()
                .map_into_right_body();
            Ok(req.into_response(response))
        })
    }
}

/// Extract a cookie value from a raw Cookie header string.
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then(|| v.to_string())
    })
}

fn verify_access_token(token: &str, key: &str) -> bool {
    let validation = Validation::new(Algorithm::HS256);
    decode::<AccessClaims>(token, &DecodingKey::from_secret(key.as_bytes()), &validation).is_ok()
}
