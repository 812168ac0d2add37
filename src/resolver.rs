use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::request::Parts;
use serde_json::Value;

use crate::credentials::Credentials;

/// Outcome of one credential lookup.
///
/// The resolver completes exactly once per invocation; the three-way result
/// is a sum type rather than a callback, so a double completion cannot be
/// expressed and a completion after the evaluation was dropped has no effect.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverOutcome {
    /// The lookup itself failed. The payload travels to the client verbatim
    /// in the 500 response body, whatever shape it has.
    Error(Value),
    /// The credentials do not match any known principal.
    Rejected,
    /// The credentials matched. The value is the candidate identity and must
    /// be a JSON object.
    Accepted(Value),
}

/// External collaborator mapping decoded credentials to an identity.
///
/// Invoked at most once per evaluation; the pipeline never retries or caches
/// a lookup. The request head is available so implementations can inspect
/// transport-level details; the pipeline itself never interprets it.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn resolve(&self, credentials: &Credentials, request: &Parts) -> ResolverOutcome;
}

/// In-memory resolver backed by a fixed username table, for tests and
/// development hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    users: HashMap<String, StaticUser>,
}

#[derive(Debug, Clone)]
struct StaticUser {
    password: String,
    identity: Value,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. The identity is handed to the pipeline as-is, so it
    /// should be a JSON object.
    pub fn with_user(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        identity: Value,
    ) -> Self {
        self.users.insert(
            username.into(),
            StaticUser {
                password: password.into(),
                identity,
            },
        );
        self
    }
}

#[async_trait]
impl CredentialResolver for StaticResolver {
    async fn resolve(&self, credentials: &Credentials, _request: &Parts) -> ResolverOutcome {
        match self.users.get(&credentials.username) {
            Some(user) if user.password == credentials.password => {
                ResolverOutcome::Accepted(user.identity.clone())
            }
            _ => ResolverOutcome::Rejected,
        }
    }
}
