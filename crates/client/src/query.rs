//! Query-string builder for list and filter endpoints.

use std::fmt::Display;

/// Ordered query parameters.
///
/// Values are rendered with `Display` and sent verbatim (percent-encoded
/// on the wire). Optional filters added with [`push_opt`](Self::push_opt)
/// are skipped entirely when `None`, so they never appear as empty keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append `key=value`.
    #[must_use]
    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_owned(), value.to_string()));
        self
    }

    /// Append `key=value` only when `value` is present.
    #[must_use]
    pub fn push_opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Whether no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Value of the first parameter named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The parameters in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as an `application/x-www-form-urlencoded` string.
    #[must_use]
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_verbatim_and_ordered() {
        let query = QueryParams::new()
            .push("offset", 20)
            .push("limit", 10)
            .push("search", "jane");
        assert_eq!(query.encode(), "offset=20&limit=10&search=jane");
        assert_eq!(query.get("limit"), Some("10"));
    }

    #[test]
    fn test_omitted_options_never_appear() {
        let query = QueryParams::new()
            .push_opt("offset", Some(0))
            .push_opt::<u32>("limit", None)
            .push_opt::<&str>("status", None);
        assert_eq!(query.encode(), "offset=0");
        assert!(query.get("limit").is_none());
        assert!(query.get("status").is_none());
    }

    #[test]
    fn test_empty() {
        let query = QueryParams::new().push_opt::<&str>("category", None);
        assert!(query.is_empty());
        assert_eq!(query.encode(), "");
    }

    #[test]
    fn test_special_characters_are_encoded() {
        let query = QueryParams::new().push("query", "red shoes & socks");
        assert_eq!(query.encode(), "query=red+shoes+%26+socks");
    }
}
