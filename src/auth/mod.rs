//! Bearer-token authentication for the admin API.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, ErrorDetails, ErrorResponse};

/// Fallback header name for the admin token.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Admin authentication layer function that takes the expected token as a parameter.
///
/// The token is read from `Authorization: Bearer <token>` (what the admin
/// frontend sends) with `x-api-key` accepted as a fallback for scripts.
pub async fn admin_auth_layer(
    expected_token: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // If no token is configured, allow all requests (dev mode)
    let Some(expected) = expected_token else {
        return next.run(request).await;
    };

    // Get the bearer token from the Authorization header
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    match bearer {
        Some(token) => {
            // Constant-time comparison to prevent timing attacks
            if constant_time_compare(&token, &expected) {
                next.run(request).await
            } else {
                unauthorized_response("Invalid admin token")
            }
        }
        None => {
            let api_key = request
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            match api_key {
                Some(key) if constant_time_compare(&key, &expected) => next.run(request).await,
                _ => unauthorized_response("Missing or invalid admin token"),
            }
        }
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
