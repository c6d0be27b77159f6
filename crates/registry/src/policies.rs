use std::collections::HashMap;
use std::sync::Arc;

/// Per-type policy declaring which field uniquely identifies an instance.
///
/// Two selections referencing "the same" entity (same key field value)
/// resolve to the same fixture output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePolicy {
    pub key_field: Arc<str>,
}

/// Key-field policies, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct TypePolicies {
    policies: HashMap<Arc<str>, TypePolicy>,
}

impl TypePolicies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_name: impl Into<Arc<str>>, key_field: impl Into<Arc<str>>) {
        self.policies.insert(
            type_name.into(),
            TypePolicy {
                key_field: key_field.into(),
            },
        );
    }

    /// The key field configured for a type, if any.
    #[must_use]
    pub fn key_field(&self, type_name: &str) -> Option<&str> {
        self.policies
            .get(type_name)
            .map(|policy| policy.key_field.as_ref())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Check every policy's type name against the set of known schema
    /// types. Unknown names produce a warning with a fuzzy-matched
    /// suggestion where one is close enough.
    pub fn validate_against<'a>(
        &self,
        known_types: impl Iterator<Item = &'a str> + Clone,
    ) -> Vec<PolicyWarning> {
        let mut warnings = Vec::new();
        for type_name in self.policies.keys() {
            if known_types.clone().any(|known| known == type_name.as_ref()) {
                continue;
            }
            let suggestion = closest_match(type_name, known_types.clone());
            tracing::warn!(
                type_name = type_name.as_ref(),
                suggestion = suggestion.as_deref(),
                "type policy references unknown type"
            );
            warnings.push(PolicyWarning {
                type_name: type_name.clone(),
                suggestion: suggestion.map(Arc::from),
            });
        }
        warnings
    }
}

/// A policy referencing a type the schema does not define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyWarning {
    pub type_name: Arc<str>,
    pub suggestion: Option<Arc<str>>,
}

impl std::fmt::Display for PolicyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown type '{}' in type policies", self.type_name)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

fn closest_match<'a>(target: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    candidates
        .map(|candidate| (strsim::jaro_winkler(target, candidate), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, candidate)| candidate.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_field_lookup() {
        let mut policies = TypePolicies::new();
        policies.insert("GitBlob", "canonicalURL");
        assert_eq!(policies.key_field("GitBlob"), Some("canonicalURL"));
        assert_eq!(policies.key_field("GitTree"), None);
    }

    #[test]
    fn validate_suggests_close_names() {
        let mut policies = TypePolicies::new();
        policies.insert("GitBlb", "canonicalURL");
        let known = ["GitBlob", "GitTree", "Query"];
        let warnings = policies.validate_against(known.iter().copied());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].suggestion.as_deref(), Some("GitBlob"));
    }

    #[test]
    fn validate_passes_known_names() {
        let mut policies = TypePolicies::new();
        policies.insert("GitBlob", "canonicalURL");
        let known = ["GitBlob"];
        assert!(policies.validate_against(known.iter().copied()).is_empty());
    }
}
