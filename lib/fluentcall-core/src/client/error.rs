/// Errors that can occur while assembling a request.
///
/// Assembly degrades gracefully on missing data (absent parameters, blank
/// header lists), so the only failures surfaced here come from serializing
/// a body or parameter value. They are propagated unchanged to the caller.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ClientError {
    /// JSON serialization error.
    ///
    /// Occurs when a request body or typed query object cannot be
    /// serialized with `serde_json`.
    JsonError(serde_json::Error),

    /// Wire encoding error for form bodies and query strings.
    ///
    /// Occurs when parameter pairs cannot be url-encoded.
    UrlEncodedError(serde_urlencoded::ser::Error),

    /// Parameter value cannot be converted to the required format.
    ///
    /// Occurs when a value is too deeply nested for query or form encoding.
    #[display("Unsupported parameter value: {message}. Got: {value}")]
    #[from(skip)]
    UnsupportedParameterValue {
        /// Specific error message describing the conversion failure.
        message: String,
        /// The value that failed to convert.
        value: serde_json::Value,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ClientError>();
        assert_sync::<ClientError>();
    }
}
