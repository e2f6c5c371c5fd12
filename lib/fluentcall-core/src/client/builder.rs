use std::mem;
use std::sync::Arc;

use http::Method;

use crate::client::body::{BinaryBody, BodyPart};
use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::client::headers::HeaderMap;
use crate::client::param::ParamMap;

/// Mutable request accumulator threaded through a fluent call chain.
///
/// A builder is created once per outgoing call and owned exclusively by that
/// chain: path segments append to it on the way down, and the terminal
/// method segment hands it to [`ApiCall::assemble`](crate::ApiCall::assemble),
/// which folds and finalizes it. Nothing references the builder after the
/// assembled request is handed to the transport.
///
/// Headers come in two flavors. [`add_header`](Self::add_header) writes into
/// the live header map immediately; [`defer_header`](Self::defer_header)
/// records a segment-level default that is only merged in at
/// [`fold`](Self::fold) time, and only for names the caller has not set.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    path_parts: Vec<String>,
    header_map: HeaderMap,
    deferred_headers: HeaderMap,
    query_params: ParamMap,
    form_params: ParamMap,
    multipart_params: Vec<BodyPart>,
    binary_body: Option<BinaryBody>,
    config: Arc<ClientConfig>,
    folded: bool,
}

impl RequestBuilder {
    /// Creates an empty builder bound to a client configuration.
    #[must_use]
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self {
            method: Method::GET,
            path_parts: Vec::new(),
            header_map: HeaderMap::new(),
            deferred_headers: HeaderMap::new(),
            query_params: ParamMap::new(),
            form_params: ParamMap::new(),
            multipart_params: Vec::new(),
            binary_body: None,
            config,
            folded: false,
        }
    }

    /// Appends a segment to the relative resource path.
    pub fn append_path_segment(&mut self, segment: impl Into<String>) {
        self.path_parts.push(segment.into());
    }

    /// Adds a header to the live header map.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.header_map.add_header(name, value);
    }

    /// Records a segment-level default header, merged in at fold time for
    /// names the caller has not set.
    pub fn defer_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.deferred_headers.add_header(name, value);
    }

    /// Finalizes accumulated path-segment state into the builder.
    ///
    /// Must be invoked exactly once, at the point the resource path
    /// terminates in a concrete call; the assembler's entry point is that
    /// termination point. Folding twice is a caller contract violation.
    pub fn fold(&mut self) -> &mut Self {
        debug_assert!(!self.folded, "a request builder is folded exactly once");
        let deferred = mem::take(&mut self.deferred_headers);
        self.header_map.merge_absent(deferred);
        self.folded = true;
        self
    }

    /// Sets the HTTP method.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Replaces the query parameters wholesale.
    pub fn set_query_parameters(&mut self, params: ParamMap) {
        self.query_params = params;
    }

    /// Replaces the form parameters wholesale.
    pub fn set_form_parameters(&mut self, params: ParamMap) {
        self.form_params = params;
    }

    /// Replaces the multipart parts.
    pub fn set_multipart_params(&mut self, parts: Vec<BodyPart>) {
        self.multipart_params = parts;
    }

    /// Replaces the binary payload.
    pub fn set_binary_body(&mut self, binary: Option<BinaryBody>) {
        self.binary_body = binary;
    }

    /// The HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The live header map.
    #[must_use]
    pub fn header_map(&self) -> &HeaderMap {
        &self.header_map
    }

    /// Mutable access to the live header map.
    pub fn header_map_mut(&mut self) -> &mut HeaderMap {
        &mut self.header_map
    }

    /// The current query parameters.
    #[must_use]
    pub fn query_parameters(&self) -> &ParamMap {
        &self.query_params
    }

    /// The current form parameters.
    #[must_use]
    pub fn form_parameters(&self) -> &ParamMap {
        &self.form_params
    }

    /// The current multipart parts.
    #[must_use]
    pub fn multipart_params(&self) -> &[BodyPart] {
        &self.multipart_params
    }

    /// The current binary payload.
    #[must_use]
    pub fn binary_body(&self) -> Option<&BinaryBody> {
        self.binary_body.as_ref()
    }

    /// The client configuration this builder reads from.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The relative resource path accumulated so far.
    #[must_use]
    pub fn relative_path(&self) -> String {
        self.path_parts.join("/")
    }

    /// Returns `true` once [`fold`](Self::fold) has run.
    #[must_use]
    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub(crate) fn freeze(self, body: Option<String>) -> Request {
        Request {
            method: self.method,
            path: self.path_parts.join("/"),
            headers: self.header_map,
            query_params: self.query_params,
            form_params: self.form_params,
            multipart_params: self.multipart_params,
            binary_body: self.binary_body,
            body,
        }
    }
}

/// An immutable, fully assembled request, ready for a transport.
///
/// Produced by [`ApiCall::into_request`](crate::ApiCall::into_request) once
/// assembly and body resolution are done. Exactly one of the payload
/// carriers is populated for a given call: the string [`body`](Self::body),
/// the [`form_parameters`](Self::form_parameters), the multipart parts, the
/// binary payload, or none of them.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    query_params: ParamMap,
    form_params: ParamMap,
    multipart_params: Vec<BodyPart>,
    binary_body: Option<BinaryBody>,
    body: Option<String>,
}

impl Request {
    /// The HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The relative resource path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The assembled headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The filtered query parameters.
    #[must_use]
    pub fn query_parameters(&self) -> &ParamMap {
        &self.query_params
    }

    /// The form parameters carrying the payload, when form-encoded.
    #[must_use]
    pub fn form_parameters(&self) -> &ParamMap {
        &self.form_params
    }

    /// The ordered multipart parts.
    #[must_use]
    pub fn multipart_params(&self) -> &[BodyPart] {
        &self.multipart_params
    }

    /// The binary payload, when present.
    #[must_use]
    pub fn binary_body(&self) -> Option<&BinaryBody> {
        self.binary_body.as_ref()
    }

    /// The resolved string body, when the payload is not carried by form
    /// parameters, multipart parts or a binary payload.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Url-encodes the query parameters, or `None` when there are none.
    pub fn query_string(&self) -> Result<Option<String>, ClientError> {
        Self::url_encode(&self.query_params)
    }

    /// Url-encodes the form parameters into a request body, or `None` when
    /// there are none.
    pub fn form_encoded_body(&self) -> Result<Option<String>, ClientError> {
        Self::url_encode(&self.form_params)
    }

    fn url_encode(params: &ParamMap) -> Result<Option<String>, ClientError> {
        let pairs: Vec<(&str, &str)> = params
            .iter()
            .flat_map(|(name, param)| param.values().map(move |value| (name.as_str(), value)))
            .collect();
        if pairs.is_empty() {
            return Ok(None);
        }
        let encoded = serde_urlencoded::to_string(pairs)?;
        Ok(Some(encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::param::HttpParam;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(Arc::new(ClientConfig::default()))
    }

    #[test]
    fn test_fold_merges_deferred_headers_without_clobbering() {
        let mut builder = builder();
        builder.add_header("Accept", "application/json");
        builder.defer_header("Accept", "text/html");
        builder.defer_header("X-Api-Version", "2");

        builder.fold();

        assert!(builder.is_folded());
        assert_eq!(
            builder.header_map().get_values("Accept"),
            ["application/json"]
        );
        assert_eq!(builder.header_map().get_values("X-Api-Version"), ["2"]);
    }

    #[test]
    fn test_relative_path_joins_segments() {
        let mut builder = builder();
        builder.append_path_segment("users");
        builder.append_path_segment("123");
        builder.append_path_segment("orders");

        assert_eq!(builder.relative_path(), "users/123/orders");
    }

    #[test]
    fn test_set_parameters_replaces_wholesale() {
        let mut builder = builder();
        let mut first = ParamMap::new();
        first.insert("a".to_string(), HttpParam::single("1"));
        builder.set_query_parameters(first);

        let mut second = ParamMap::new();
        second.insert("b".to_string(), HttpParam::single("2"));
        builder.set_query_parameters(second);

        assert!(!builder.query_parameters().contains_key("a"));
        assert_eq!(
            builder.query_parameters().get("b"),
            Some(&HttpParam::single("2"))
        );
    }

    #[test]
    fn test_query_string_encoding() {
        let mut builder = builder();
        let mut params = ParamMap::new();
        params.insert("term".to_string(), HttpParam::single("rust lang"));
        params.insert("tag".to_string(), HttpParam::repeated(vec!["web", "api"]));
        builder.set_query_parameters(params);
        builder.fold();

        let request = builder.freeze(None);
        let query = request.query_string().expect("should encode");
        assert_eq!(query.as_deref(), Some("term=rust+lang&tag=web&tag=api"));
    }

    #[test]
    fn test_query_string_empty_is_none() {
        let mut builder = builder();
        builder.fold();
        let request = builder.freeze(None);
        assert_eq!(request.query_string().expect("should encode"), None);
    }

    #[test]
    fn test_form_encoded_body() {
        let mut builder = builder();
        let mut params = ParamMap::new();
        params.insert("username".to_string(), HttpParam::single("user@example.com"));
        params.insert("password".to_string(), HttpParam::single("secret"));
        builder.set_form_parameters(params);
        builder.fold();

        let request = builder.freeze(None);
        let body = request.form_encoded_body().expect("should encode");
        assert_eq!(
            body.as_deref(),
            Some("username=user%40example.com&password=secret")
        );
    }

    #[test]
    fn test_absent_params_encode_to_nothing() {
        let mut builder = builder();
        let mut params = ParamMap::new();
        params.insert("ghost".to_string(), HttpParam::none());
        builder.set_query_parameters(params);
        builder.fold();

        let request = builder.freeze(None);
        assert_eq!(request.query_string().expect("should encode"), None);
    }
}
