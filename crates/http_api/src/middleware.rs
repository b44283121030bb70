use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::ORIGIN},
    middleware::Next,
    response::Response,
};

use crate::{errors::HttpError, state::HttpState};

const TOKEN_HEADER: &str = "x-waitdash-token";
const LOOPBACK_HOSTS: [&str; 3] = ["127.0.0.1", "localhost", "[::1]"];

/// Gate for every /api route: browser-originated requests must come from a
/// loopback page, and every caller must present the per-run token.
pub async fn require_csrf(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    check_origin(req.headers())?;
    check_token(req.headers(), state.csrf_token())?;
    Ok(next.run(req).await)
}

fn check_origin(headers: &HeaderMap) -> Result<(), HttpError> {
    // Non-browser clients send no Origin; the token check still applies.
    let Some(origin) = headers.get(ORIGIN) else {
        return Ok(());
    };
    let allowed = origin.to_str().map(origin_is_loopback).unwrap_or(false);
    if allowed {
        Ok(())
    } else {
        Err(HttpError::forbidden("invalid origin", "invalid_origin"))
    }
}

fn check_token(headers: &HeaderMap, expected: &str) -> Result<(), HttpError> {
    match headers.get(TOKEN_HEADER).and_then(|value| value.to_str().ok()) {
        Some(token) if token == expected => Ok(()),
        _ => Err(HttpError::unauthorized(
            "missing or invalid CSRF token",
            "csrf_invalid",
        )),
    }
}

pub(crate) fn origin_is_loopback(origin: &str) -> bool {
    let host_and_port = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"));
    let Some(rest) = host_and_port else {
        return false;
    };
    LOOPBACK_HOSTS
        .iter()
        .any(|host| rest.strip_prefix(host).is_some_and(|tail| tail.starts_with(':')))
}
