use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::identity::Identity;

/// Why an evaluation ended unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No header was sent, or the header names a different scheme. Under
    /// optional mode this kind degrades to anonymous pass-through; every
    /// other kind still denies.
    MissingCredentials,
    /// The username decoded to the empty string while `allow_empty_username`
    /// is off.
    EmptyUsername,
    /// The resolver rejected the credential pair.
    InvalidCredentials,
}

impl DenyReason {
    fn message(&self) -> &'static str {
        match self {
            DenyReason::MissingCredentials => "missing basic credentials",
            DenyReason::EmptyUsername => "empty username is not allowed",
            DenyReason::InvalidCredentials => "invalid username or password",
        }
    }
}

/// Server-side failure during resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum InternalCause {
    /// The resolver reported an error; its payload is forwarded verbatim.
    Resolver(Value),
    /// The resolver accepted the credentials but supplied a non-object
    /// identity, violating its contract.
    NonObjectIdentity,
}

/// Final categorical outcome of one authentication evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Authenticated(Identity),
    Unauthenticated(DenyReason),
    Forbidden(String),
    MalformedRequest(&'static str),
    InternalError(InternalCause),
}

impl Verdict {
    /// HTTP status this verdict maps to. `Authenticated` maps to the 200
    /// path; the handler decides the real status.
    pub fn status(&self) -> StatusCode {
        match self {
            Verdict::Authenticated(_) => StatusCode::OK,
            Verdict::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Verdict::Forbidden(_) => StatusCode::FORBIDDEN,
            Verdict::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Verdict::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetails<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetails<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for Verdict {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            // The guard never converts an acceptance; a host that does gets
            // an empty 200.
            Verdict::Authenticated(_) => return StatusCode::OK.into_response(),
            Verdict::Unauthenticated(reason) => {
                let mut response = error_response(
                    StatusCode::UNAUTHORIZED,
                    "unauthorized",
                    reason.message().to_string(),
                );
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
                return response;
            }
            Verdict::Forbidden(reason) => (StatusCode::FORBIDDEN, "forbidden", reason),
            Verdict::MalformedRequest(detail) => {
                (StatusCode::BAD_REQUEST, "bad_request", detail.to_string())
            }
            Verdict::InternalError(InternalCause::Resolver(payload)) => {
                // Resolver failures travel to the client unmodified, whatever
                // shape the payload has.
                let mut response = Json(payload).into_response();
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                return response;
            }
            Verdict::InternalError(InternalCause::NonObjectIdentity) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal server error".to_string(),
            ),
        };

        error_response(status, code, message)
    }
}

fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    let mut response = Json(ErrorBody {
        error: ErrorDetails { code, message },
    })
    .into_response();
    *response.status_mut() = status;
    response
}
