use serde::Deserialize;

use crate::identity::Identity;

/// Scope requirement attached to a protected route.
///
/// Deserializes from the route's `auth.scope` setting: absent, a single scope
/// string, or an array of scopes that must all be present on the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScopeRequirement {
    #[default]
    None,
    One(String),
    All(Vec<String>),
}

impl ScopeRequirement {
    /// Whether the identity's scope set satisfies this requirement.
    ///
    /// Array requirements use AND semantics: every listed scope must be
    /// present. An identity without a `scope` attribute fails any non-empty
    /// requirement.
    pub fn satisfied_by(&self, identity: &Identity) -> bool {
        match self {
            ScopeRequirement::None => true,
            ScopeRequirement::One(scope) => identity
                .scopes()
                .is_some_and(|scopes| scopes.contains(&scope.as_str())),
            ScopeRequirement::All(required) => identity.scopes().is_some_and(|scopes| {
                required.iter().all(|scope| scopes.contains(&scope.as_str()))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity(value: serde_json::Value) -> Identity {
        Identity::from_value(value).expect("object identity")
    }

    #[test]
    fn no_requirement_always_passes() {
        let id = identity(json!({ "user": "john" }));
        assert!(ScopeRequirement::None.satisfied_by(&id));
    }

    #[test]
    fn single_scope_must_be_present() {
        let id = identity(json!({ "scope": ["a"] }));
        assert!(ScopeRequirement::One("a".into()).satisfied_by(&id));
        assert!(!ScopeRequirement::One("x".into()).satisfied_by(&id));
    }

    #[test]
    fn array_requirement_needs_every_scope() {
        let narrow = identity(json!({ "scope": ["a"] }));
        let wide = identity(json!({ "scope": ["x", "y", "a"] }));
        let requirement = ScopeRequirement::All(vec!["x".into(), "y".into()]);
        assert!(!requirement.satisfied_by(&narrow));
        assert!(requirement.satisfied_by(&wide));
    }

    #[test]
    fn missing_scope_attribute_fails_any_requirement() {
        let id = identity(json!({ "user": "john" }));
        assert!(!ScopeRequirement::One("a".into()).satisfied_by(&id));
        assert!(!ScopeRequirement::All(vec!["a".into()]).satisfied_by(&id));
    }
}
