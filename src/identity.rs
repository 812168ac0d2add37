use serde_json::{Map, Value};

/// Attribute bag supplied by a resolver when it accepts credentials.
///
/// By contract an identity is always a JSON object; anything else coming back
/// from a resolver is a contract violation, not an authentication failure.
/// Once accepted the identity is immutable for the rest of the evaluation and
/// is cloned into request extensions for handlers and nested evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity(Map<String, Value>);

impl Identity {
    /// Validate a resolver-supplied value. Returns the value unchanged when
    /// it is not an object so the caller can report it.
    pub fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The identity's `scope` attribute, if present. Entries that are not
    /// strings are skipped.
    pub fn scopes(&self) -> Option<Vec<&str>> {
        self.0
            .get("scope")
            .and_then(Value::as_array)
            .map(|scopes| scopes.iter().filter_map(Value::as_str).collect())
    }
}
