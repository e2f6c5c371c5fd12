use http::Method;
use tracing::debug;

use crate::client::body::{BinaryBody, BodyPart, Payload};
use crate::client::builder::{Request, RequestBuilder};
use crate::client::error::ClientError;
use crate::client::headers::{ACCEPT, CONTENT_TYPE};
use crate::client::param::{ParamMap, TypedQuery};

/// Immutable description of one HTTP call, produced by a generated call
/// site.
///
/// A descriptor gathers everything the terminal segment of a fluent chain
/// knows about the call: the method, an optional body, up to four
/// independent payload/parameter sources and the default Accept and
/// Content-Type values of the operation. It is consumed by
/// [`ApiCall::assemble`] and discarded.
#[derive(Debug, Clone)]
pub struct CallDescriptor<B> {
    method: Method,
    body: Option<B>,
    query_params: Option<ParamMap>,
    query_string: Option<TypedQuery>,
    form_params: Option<ParamMap>,
    multipart_params: Option<Vec<BodyPart>>,
    binary_body: Option<BinaryBody>,
    accept: Option<String>,
    content_type: Option<String>,
}

impl<B> CallDescriptor<B> {
    /// Creates a descriptor for the given method, with everything else
    /// absent.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            query_params: None,
            query_string: None,
            form_params: None,
            multipart_params: None,
            binary_body: None,
            accept: None,
            content_type: None,
        }
    }

    /// Sets the body value. It is stored as-is; serialization happens at
    /// body-resolution time.
    #[must_use]
    pub fn with_body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the plain query-parameter map.
    #[must_use]
    pub fn with_query_params(mut self, params: ParamMap) -> Self {
        self.query_params = Some(params);
        self
    }

    /// Sets the typed query-string object.
    ///
    /// When present it overrides the plain query-parameter map outright,
    /// even a non-empty one.
    #[must_use]
    pub fn with_query_string(mut self, query: TypedQuery) -> Self {
        self.query_string = Some(query);
        self
    }

    /// Sets the form-parameter map.
    #[must_use]
    pub fn with_form_params(mut self, params: ParamMap) -> Self {
        self.form_params = Some(params);
        self
    }

    /// Sets the ordered multipart parts.
    #[must_use]
    pub fn with_multipart_params(mut self, parts: Vec<BodyPart>) -> Self {
        self.multipart_params = Some(parts);
        self
    }

    /// Sets the binary payload.
    #[must_use]
    pub fn with_binary_body(mut self, binary: BinaryBody) -> Self {
        self.binary_body = Some(binary);
        self
    }

    /// Sets the default Accept header value of the operation.
    #[must_use]
    pub fn with_accept(mut self, value: impl Into<String>) -> Self {
        self.accept = Some(value.into());
        self
    }

    /// Sets the default Content-Type header value of the operation.
    #[must_use]
    pub fn with_content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }
}

/// A finalized call: the terminal segment of a fluent chain.
///
/// [`ApiCall::assemble`] is where a resource path terminates in a concrete
/// HTTP call. It folds the builder, merges the descriptor's parameter
/// sources into it, injects default headers without clobbering caller-set
/// ones and normalizes the Content-Type charset. The resulting value holds
/// the stored body and the finalized builder until the transport picks the
/// request up.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use fluentcall_core::{ApiCall, CallDescriptor, ClientConfig, RequestBuilder};
/// use http::Method;
///
/// # fn main() -> Result<(), fluentcall_core::ClientError> {
/// let config = Arc::new(ClientConfig::default());
/// let mut builder = RequestBuilder::new(config);
/// builder.append_path_segment("health");
///
/// let descriptor = CallDescriptor::<()>::new(Method::GET).with_accept("application/json");
/// let call = ApiCall::assemble(descriptor, builder);
///
/// assert_eq!(call.builder().header_map().get_values("Accept"), ["application/json"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiCall<B> {
    body: Option<B>,
    builder: RequestBuilder,
}

impl<B> ApiCall<B> {
    /// Assembles a call from its descriptor, taking the not-yet-folded
    /// builder by exclusive ownership.
    ///
    /// Invoked once per outgoing call. The builder is folded first, so
    /// segment-level default headers are in place before any default
    /// injection or charset normalization looks at the header map.
    #[must_use]
    pub fn assemble(descriptor: CallDescriptor<B>, mut builder: RequestBuilder) -> Self {
        let CallDescriptor {
            method,
            body,
            query_params,
            query_string,
            form_params,
            multipart_params,
            binary_body,
            accept,
            content_type,
        } = descriptor;
        debug!(%method, "assembling request");

        // End of the resource path: fold before any other mutation.
        builder.fold();
        builder.set_method(method);

        let actual_query_params = match query_string {
            Some(query) => Some(query.into_params()),
            None => query_params,
        };
        builder.set_query_parameters(remove_empty_params(actual_query_params));
        builder.set_form_parameters(remove_empty_params(form_params));
        builder.set_multipart_params(multipart_params.unwrap_or_default());
        builder.set_binary_body(binary_body);

        if let Some(accept) = accept {
            if !builder.header_map().has_key(ACCEPT) {
                builder.header_map_mut().add_header(ACCEPT, accept);
            }
        }
        if let Some(content_type) = content_type {
            if !builder.header_map().has_key(CONTENT_TYPE) {
                builder.header_map_mut().add_header(CONTENT_TYPE, content_type);
            }
        }

        apply_request_charset(&mut builder);

        Self { body, builder }
    }

    /// The stored body value, when one was supplied.
    #[must_use]
    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// The body's default string representation, when a body is present.
    #[must_use]
    pub fn plain_string_body(&self) -> Option<String>
    where
        B: ToString,
    {
        self.body.as_ref().map(ToString::to_string)
    }

    /// Serializes the body for the given canonical content type, or `None`
    /// without a body.
    pub fn serialized_body(&self, canonical_content_type: &str) -> Result<Option<String>, ClientError>
    where
        B: Payload,
    {
        self.body
            .as_ref()
            .map(|body| body.write_body_to_string(canonical_content_type))
            .transpose()
    }

    /// Returns `true` when any current Content-Type value contains
    /// `application/x-www-form-urlencoded`.
    ///
    /// The match is a case-sensitive substring test on the raw value, unlike
    /// the case-insensitive charset scan.
    #[must_use]
    pub fn is_form_url_encoded(&self) -> bool {
        self.builder
            .header_map()
            .get_values(CONTENT_TYPE)
            .iter()
            .any(|value| value.contains(mime::APPLICATION_WWW_FORM_URLENCODED.as_ref()))
    }

    /// Resolves the effective body of the call.
    ///
    /// When the builder has no form parameters yet, a body is present and
    /// the Content-Type announces form encoding, the body is converted into
    /// form parameters, the builder's form parameters are overwritten with
    /// the result and `None` is returned: form encoding, not a string
    /// payload, carries the data. Otherwise the serialized body is returned.
    ///
    /// Nothing is cached; in the form-encoded branch a second invocation
    /// re-derives the form parameters, so call this at most once per request
    /// (or use [`into_request`](Self::into_request), which does).
    pub fn resolve_body(&mut self, canonical_content_type: &str) -> Result<Option<String>, ClientError>
    where
        B: Payload,
    {
        let form_fallback =
            self.builder.form_parameters().is_empty() && self.body.is_some() && self.is_form_url_encoded();
        if form_fallback {
            if let Some(body) = self.body.as_ref() {
                let form_params = body.to_form_urlencoded()?;
                self.builder.set_form_parameters(form_params);
            }
            return Ok(None);
        }
        self.serialized_body(canonical_content_type)
    }

    /// The finalized builder.
    #[must_use]
    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Mutable access to the finalized builder.
    pub fn builder_mut(&mut self) -> &mut RequestBuilder {
        &mut self.builder
    }

    /// Resolves the body once and freezes everything into an immutable
    /// [`Request`] for the transport.
    pub fn into_request(mut self, canonical_content_type: &str) -> Result<Request, ClientError>
    where
        B: Payload,
    {
        let body = self.resolve_body(canonical_content_type)?;
        Ok(self.builder.freeze(body))
    }
}

/// Drops entries whose parameter carries no data.
fn remove_empty_params(params: Option<ParamMap>) -> ParamMap {
    params
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, param)| param.non_empty())
        .collect()
}

/// Appends the configured request charset to the first Content-Type value
/// when none of the values carries one.
///
/// Binary content (any value containing `octet-stream`) is left alone, as
/// are value lists that already mention a charset anywhere. Both scans are
/// case-insensitive.
fn apply_request_charset(builder: &mut RequestBuilder) {
    if !builder.header_map().has_key(CONTENT_TYPE) {
        return;
    }
    let values = builder.header_map().get_values(CONTENT_TYPE);
    let has_charset = values
        .iter()
        .any(|value| value.to_lowercase().contains("charset"));
    let is_binary = values
        .iter()
        .any(|value| value.to_lowercase().contains("octet-stream"));
    if is_binary || has_charset || values.is_empty() {
        return;
    }
    let Some(charset) = builder.config().request_charset() else {
        return;
    };
    let charset = charset.to_owned();
    let mut values = values.to_vec();
    if let Some(first) = values.first_mut() {
        *first = format!("{first}; charset={charset}");
    }
    builder.header_map_mut().set_header(CONTENT_TYPE, values);
}
