//! Request pipeline stage running the schema validator.
//!
//! The host wires [`validation_middleware`] in front of an operation with
//! `axum::middleware::from_fn_with_state`, passing a [`ValidationState`]
//! built from that operation's schema. The stage snapshots the declared
//! surfaces (path parameters, query parameters, JSON body), runs every rule,
//! and either rejects with the full violation list or hands the request to
//! the next stage unchanged.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use axum::{
    Json,
    body::{Body, to_bytes},
    extract::{FromRequestParts, Query, RawPathParams, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, error};

use crate::app::presenter::user_message;
use crate::app::validator::{RequestData, RequestValidator};
use crate::domain::{
    AppError, ErrorCode, ErrorResponse, ValidationRejection, WalletErrorResponse,
};

/// Default request body cap (10 MiB)
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Transport limits for the validation stage
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Maximum number of body bytes buffered before validation
    pub max_body_bytes: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ValidationConfig {
    /// Read limits from the environment (`GUARD_MAX_BODY_BYTES`)
    #[must_use]
    pub fn from_env() -> Self {
        let max_body_bytes = env::var("GUARD_MAX_BODY_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);
        Self { max_body_bytes }
    }
}

/// Shared state for one wired operation
#[derive(Clone)]
pub struct ValidationState {
    pub validator: Arc<RequestValidator>,
    pub config: ValidationConfig,
}

impl ValidationState {
    #[must_use]
    pub fn new(validator: Arc<RequestValidator>) -> Self {
        Self {
            validator,
            config: ValidationConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(validator: Arc<RequestValidator>, config: ValidationConfig) -> Self {
        Self { validator, config }
    }
}

/// Validate the request against the operation's schema.
///
/// On failure the pipeline short-circuits with a 400 response carrying every
/// violation; on success the buffered body is restored and the inner handler
/// runs with the request unchanged.
pub async fn validation_middleware(
    State(state): State<ValidationState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();

    let mut data = RequestData::new();

    // Path parameters; routes without any leave the surface empty
    if let Ok(params) = RawPathParams::from_request_parts(&mut parts, &()).await {
        for (key, value) in &params {
            data.params
                .insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    if let Ok(Query(query)) =
        Query::<HashMap<String, String>>::from_request_parts(&mut parts, &()).await
    {
        for (key, value) in query {
            data.query.insert(key, Value::String(value));
        }
    }

    let bytes = to_bytes(body, state.config.max_body_bytes)
        .await
        .map_err(|_| AppError::PayloadTooLarge(state.config.max_body_bytes))?;

    // An absent body is the empty mapping; malformed JSON is rejected before
    // any rule runs. Non-object bodies also leave the surface empty, so
    // declared fields evaluate as absent.
    if !bytes.is_empty() {
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::InvalidBody(e.to_string()))?;
        if let Value::Object(fields) = value {
            data.body = fields;
        }
    }

    state.validator.validate(&data)?;

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(details) => {
                debug!(violations = details.len(), "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationRejection::new(details)),
                )
                    .into_response()
            }
            AppError::InvalidBody(message) => {
                debug!(error = %message, "Rejected unparseable body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("Invalid JSON body")),
                )
                    .into_response()
            }
            AppError::PayloadTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse::new(format!(
                    "Request body exceeds {} bytes",
                    limit
                ))),
            )
                .into_response(),
            AppError::Wallet(canonical) => {
                let status = match canonical.code {
                    ErrorCode::InsufficientFunds => StatusCode::PAYMENT_REQUIRED,
                    ErrorCode::UserRejected => StatusCode::BAD_REQUEST,
                    ErrorCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_GATEWAY,
                };
                if status.is_server_error() {
                    error!(code = %canonical.code, message = %canonical.message, "Wallet operation failed");
                }
                (
                    status,
                    Json(WalletErrorResponse {
                        code: canonical.code,
                        message: user_message(&canonical),
                    }),
                )
                    .into_response()
            }
            AppError::Internal(message) => {
                error!(message = %message, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}
