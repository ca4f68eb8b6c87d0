//! Ordered token-to-value mapping supplied by callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One token and the value that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateValue {
    /// Token as it appears in the document, delimiters included
    pub token: String,
    /// Replacement text
    pub value: String,
}

impl TemplateValue {
    /// Create a new pair.
    pub fn new(token: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            value: value.into(),
        }
    }
}

/// Ordered mapping from token to replacement value.
///
/// Tokens are unique: inserting a token again replaces its value and keeps
/// its original position. Deserializes from either a JSON object or an
/// array of `{"token": .., "value": ..}` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SubstitutionsRepr", into = "Vec<TemplateValue>")]
pub struct Substitutions {
    pairs: Vec<TemplateValue>,
}

impl Substitutions {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a token's value.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        let token = token.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|p| p.token == token) {
            Some(existing) => existing.value = value,
            None => self.pairs.push(TemplateValue { token, value }),
        }
    }

    /// Builder form of [`Substitutions::insert`].
    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(token, value);
        self
    }

    /// Value for a token.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.token == token)
            .map(|p| p.value.as_str())
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(token, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs
            .iter()
            .map(|p| (p.token.as_str(), p.value.as_str()))
    }

    /// Iterate over tokens in insertion order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.pairs.iter().map(|p| p.token.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Substitutions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut subs = Self::new();
        subs.extend(iter);
        subs
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Substitutions {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (token, value) in iter {
            self.insert(token, value);
        }
    }
}

impl From<Vec<TemplateValue>> for Substitutions {
    fn from(pairs: Vec<TemplateValue>) -> Self {
        pairs.into_iter().map(|p| (p.token, p.value)).collect()
    }
}

impl From<Substitutions> for Vec<TemplateValue> {
    fn from(subs: Substitutions) -> Self {
        subs.pairs
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SubstitutionsRepr {
    Pairs(Vec<TemplateValue>),
    Map(BTreeMap<String, String>),
}

impl From<SubstitutionsRepr> for Substitutions {
    fn from(repr: SubstitutionsRepr) -> Self {
        match repr {
            SubstitutionsRepr::Pairs(pairs) => pairs.into(),
            SubstitutionsRepr::Map(map) => map.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_last_value() {
        let mut subs = Substitutions::new();
        subs.insert("{{b}}", "1");
        subs.insert("{{a}}", "2");
        subs.insert("{{b}}", "3");

        let pairs: Vec<(&str, &str)> = subs.iter().collect();
        assert_eq!(pairs, vec![("{{b}}", "3"), ("{{a}}", "2")]);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs.get("{{a}}"), Some("2"));
        assert_eq!(subs.get("{{c}}"), None);
    }

    #[test]
    fn test_from_iterator() {
        let subs: Substitutions = [("{{x}}", "1"), ("{{y}}", "2")].into_iter().collect();
        assert_eq!(subs.tokens().collect::<Vec<_>>(), vec!["{{x}}", "{{y}}"]);
    }

    #[test]
    fn test_deserialize_array() {
        let subs: Substitutions = serde_json::from_str(
            r#"[{"token":"{{name}}","value":"Ann"},{"token":"{{city}}","value":"Oslo"}]"#,
        )
        .unwrap();
        assert_eq!(subs.tokens().collect::<Vec<_>>(), vec!["{{name}}", "{{city}}"]);
    }

    #[test]
    fn test_deserialize_object() {
        let subs: Substitutions =
            serde_json::from_str(r#"{"{{name}}":"Ann","{{city}}":"Oslo"}"#).unwrap();
        assert_eq!(subs.get("{{name}}"), Some("Ann"));
        assert_eq!(subs.get("{{city}}"), Some("Oslo"));
    }

    #[test]
    fn test_serialize_as_pairs() {
        let subs = Substitutions::new().with("{{x}}", "1");
        let json = serde_json::to_string(&subs).unwrap();
        assert_eq!(json, r#"[{"token":"{{x}}","value":"1"}]"#);
    }
}
