/// Read-only client configuration shared across calls.
///
/// One configuration value is created with the client and handed to every
/// [`RequestBuilder`](crate::RequestBuilder) by reference; this crate never
/// mutates it.
///
/// # Examples
///
/// ```rust
/// use fluentcall_core::ClientConfig;
///
/// let config = ClientConfig::default().with_request_charset("UTF-8");
/// assert_eq!(config.request_charset(), Some("UTF-8"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    request_charset: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration with no request charset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the charset appended to Content-Type headers that carry none.
    #[must_use]
    pub fn with_request_charset(mut self, charset: impl Into<String>) -> Self {
        self.request_charset = Some(charset.into());
        self
    }

    /// The configured request charset name, when set.
    #[must_use]
    pub fn request_charset(&self) -> Option<&str> {
        self.request_charset.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_is_absent_by_default() {
        assert_eq!(ClientConfig::new().request_charset(), None);
    }
}
