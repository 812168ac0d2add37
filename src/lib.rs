//! HTTP Basic-Authentication strategy middleware for axum routers.
//!
//! The crate implements one decision pipeline: read the request's
//! `Authorization` header, decode and split the credentials, resolve them
//! through a caller-supplied [`CredentialResolver`], enforce the route's
//! scope requirement, and hand the host a [`Verdict`]. Everything around the
//! pipeline (listening, TLS, route matching) belongs to the host.

pub mod config;
pub mod credentials;
pub mod identity;
pub mod resolver;
pub mod scope;
pub mod verdict;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use config::{AuthMode, BasicAuthSettings, RouteAuthConfig};
use credentials::ParseError;
use identity::Identity;
use resolver::{CredentialResolver, ResolverOutcome};
use scope::ScopeRequirement;
use verdict::{DenyReason, InternalCause, Verdict};

/// Everything [`basic_auth_guard`] needs for one route group: the resolver,
/// the strategy settings, and the per-route requirement.
#[derive(Clone)]
pub struct BasicAuthState {
    pub resolver: Arc<dyn CredentialResolver>,
    pub settings: BasicAuthSettings,
    pub route: RouteAuthConfig,
}

impl BasicAuthState {
    pub fn new(resolver: Arc<dyn CredentialResolver>) -> Self {
        Self {
            resolver,
            settings: BasicAuthSettings::default(),
            route: RouteAuthConfig::default(),
        }
    }

    pub fn with_settings(mut self, settings: BasicAuthSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_route(mut self, route: RouteAuthConfig) -> Self {
        self.route = route;
        self
    }
}

/// Run the decision pipeline over one request head.
///
/// Parse, resolve, enforce; short-circuits on the first failure, never loops
/// and never retries the resolver. The function is pure over its explicit
/// inputs and safe to re-enter, so a handler may evaluate an inner request
/// while its own evaluation is still on the stack.
pub async fn evaluate(
    parts: &Parts,
    requirement: &ScopeRequirement,
    settings: &BasicAuthSettings,
    resolver: &dyn CredentialResolver,
) -> Verdict {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let credentials = match credentials::parse(header, settings.allow_empty_username) {
        Ok(credentials) => credentials,
        Err(ParseError::MissingCredentials) => {
            return Verdict::Unauthenticated(DenyReason::MissingCredentials)
        }
        Err(ParseError::EmptyUsername) => {
            return Verdict::Unauthenticated(DenyReason::EmptyUsername)
        }
        Err(ParseError::Malformed(detail)) => return Verdict::MalformedRequest(detail),
    };

    let identity = match resolver.resolve(&credentials, parts).await {
        ResolverOutcome::Error(payload) => {
            tracing::warn!(username = %credentials.username, "credential resolver failed");
            return Verdict::InternalError(InternalCause::Resolver(payload));
        }
        ResolverOutcome::Rejected => {
            tracing::debug!(username = %credentials.username, "credentials rejected");
            return Verdict::Unauthenticated(DenyReason::InvalidCredentials);
        }
        ResolverOutcome::Accepted(value) => match Identity::from_value(value) {
            Ok(identity) => identity,
            Err(value) => {
                tracing::warn!(
                    username = %credentials.username,
                    identity = %value,
                    "resolver accepted with a non-object identity"
                );
                return Verdict::InternalError(InternalCause::NonObjectIdentity);
            }
        },
    };

    if !requirement.satisfied_by(&identity) {
        tracing::debug!(username = %credentials.username, "scope requirement not met");
        return Verdict::Forbidden(format!(
            "user {} lacks the scope required for this route",
            credentials.username
        ));
    }

    Verdict::Authenticated(identity)
}

/// axum middleware enforcing basic authentication for a route group.
///
/// Attach with `middleware::from_fn_with_state(state, basic_auth_guard)`. On
/// acceptance the resolved [`Identity`] lands in request extensions, where
/// handlers pick it up via `Extension<Identity>`. Under
/// [`AuthMode::Optional`] a request without basic credentials runs the
/// handler with no identity attached; every other failure still denies.
pub async fn basic_auth_guard(
    State(state): State<BasicAuthState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();

    let verdict = evaluate(
        &parts,
        &state.route.scope,
        &state.settings,
        state.resolver.as_ref(),
    )
    .await;

    let mut req = Request::from_parts(parts, body);
    match verdict {
        Verdict::Authenticated(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Verdict::Unauthenticated(DenyReason::MissingCredentials)
            if state.route.mode == AuthMode::Optional =>
        {
            next.run(req).await
        }
        verdict => verdict.into_response(),
    }
}
