use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::app::errors::json_error;

/// Admin bearer token; `None` leaves admin routes open.
#[derive(Clone, Default)]
pub struct AdminState {
    token: Option<Arc<str>>,
}

impl AdminState {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()).map(Arc::from),
        }
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), StatusCode> {
        let Some(expected) = self.token.as_deref() else {
            return Ok(());
        };
        let token = extract_bearer(headers)?;
        if token == expected {
            Ok(())
        } else {
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Extractor guarding admin handlers (listing mutations, inbox reads).
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminGuard
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = parts.extensions.get::<AdminState>().ok_or_else(|| {
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "misconfigured",
                "admin state missing",
            )
        })?;

        admin.authorize(&parts.headers).map_err(|status| {
            tracing::warn!(path = %parts.uri.path(), "admin request rejected");
            json_error(status, "unauthorized", "admin token required")
        })?;

        Ok(AdminGuard)
    }
}

/// Header naming the caller for owner-scoped wishlist routes.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity taken from [`USER_ID_HEADER`]; missing or blank is 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_user_id(&parts.headers)
            .map(|id| UserId(id.to_string()))
            .map_err(|status| json_error(status, "unauthorized", "x-user-id header required"))
    }
}

pub async fn request_log_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = res.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    res
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

fn extract_user_id(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let value = headers
        .get(USER_ID_HEADER)
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_str()
        .map_err(|_| StatusCode::UNAUTHORIZED)?
        .trim();

    if value.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(value)
}
