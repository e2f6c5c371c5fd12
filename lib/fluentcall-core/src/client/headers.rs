use indexmap::IndexMap;

/// Canonical name of the Accept header.
pub const ACCEPT: &str = "Accept";

/// Canonical name of the Content-Type header.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Multi-valued header map with case-sensitive keys.
///
/// Generated call sites and path segments contribute headers under their
/// canonical casing, so lookup is a plain string comparison: `Content-Type`
/// and `content-type` are distinct keys. Values keep insertion order, both
/// per key and across keys.
///
/// # Examples
///
/// ```rust
/// use fluentcall_core::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.add_header("Accept", "application/json");
/// headers.add_header("Accept", "application/xml");
///
/// assert!(headers.has_key("Accept"));
/// assert!(!headers.has_key("accept"));
/// assert_eq!(headers.get_values("Accept").len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: IndexMap<String, Vec<String>>,
}

impl HeaderMap {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when a header with exactly this name is present.
    #[must_use]
    pub fn has_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The ordered values of a header, or an empty slice when absent.
    #[must_use]
    pub fn get_values(&self, name: &str) -> &[String] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replaces the full value list of a header.
    pub fn set_header(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.entries.insert(name.into(), values);
    }

    /// Appends a value to a header, creating the entry if needed.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(name.into()).or_default().push(value.into());
    }

    /// Removes a header, returning its values when it was present.
    pub fn remove_header(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(name)
    }

    /// Appends every entry of `other` whose key is not yet present.
    ///
    /// Existing entries win; their values are left untouched.
    pub(crate) fn merge_absent(&mut self, other: Self) {
        for (name, values) in other.entries {
            if !self.entries.contains_key(&name) {
                self.entries.insert(name, values);
            }
        }
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// The number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no header is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut headers = HeaderMap::new();
        headers.add_header("Content-Type", "application/json");

        assert!(headers.has_key("Content-Type"));
        assert!(!headers.has_key("content-type"));
        assert!(headers.get_values("CONTENT-TYPE").is_empty());
    }

    #[test]
    fn test_add_appends_set_replaces() {
        let mut headers = HeaderMap::new();
        headers.add_header("Accept", "application/json");
        headers.add_header("Accept", "application/xml");
        assert_eq!(
            headers.get_values("Accept"),
            ["application/json", "application/xml"]
        );

        headers.set_header("Accept", vec!["text/plain".to_string()]);
        assert_eq!(headers.get_values("Accept"), ["text/plain"]);
    }

    #[test]
    fn test_get_values_absent_is_empty() {
        let headers = HeaderMap::new();
        assert!(headers.get_values("X-Missing").is_empty());
    }

    #[test]
    fn test_remove_header() {
        let mut headers = HeaderMap::new();
        headers.add_header("X-Trace", "abc");

        assert_eq!(headers.remove_header("X-Trace"), Some(vec!["abc".to_string()]));
        assert_eq!(headers.remove_header("X-Trace"), None);
        assert!(headers.is_empty());
    }

    #[test]
    fn test_merge_absent_keeps_existing_values() {
        let mut headers = HeaderMap::new();
        headers.add_header("Accept", "application/json");

        let mut deferred = HeaderMap::new();
        deferred.add_header("Accept", "text/html");
        deferred.add_header("X-Api-Version", "2");

        headers.merge_absent(deferred);

        assert_eq!(headers.get_values("Accept"), ["application/json"]);
        assert_eq!(headers.get_values("X-Api-Version"), ["2"]);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut headers = HeaderMap::new();
        headers.add_header("First", "1");
        headers.add_header("Second", "2");
        headers.add_header("Third", "3");

        let names: Vec<_> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }
}
