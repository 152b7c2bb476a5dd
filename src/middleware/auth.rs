// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Basic authentication middleware for the report pages.

use crate::config::BasicAuth;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use subtle::ConstantTimeEq;

const REALM: &str = "Basic realm=\"marathon-tracker\"";

/// Middleware that requires the configured basic auth credentials.
///
/// Passes everything through when no credentials are configured.
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.basic_auth.as_ref() else {
        return next.run(request).await;
    };

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| credentials_match(h, expected));

    if !authorized {
        tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
        let mut response = StatusCode::UNAUTHORIZED.into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM));
        return response;
    }

    next.run(request).await
}

/// Check an `Authorization: Basic ...` header value against the credentials.
fn credentials_match(header_value: &str, expected: &BasicAuth) -> bool {
    let Some(encoded) = header_value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };
    let Some((user, pass)) = decoded.split_once(':') else {
        return false;
    };

    let user_ok = user.as_bytes().ct_eq(expected.user.as_bytes());
    let pass_ok = pass.as_bytes().ct_eq(expected.pass.as_bytes());
    (user_ok & pass_ok).into()
}
