//! # Fluentcall Core
//!
//! Runtime request assembly for fluent, generated REST clients.
//!
//! Generated client code models a resource path as a chain of segments that
//! accumulate state into a [`RequestBuilder`]. When the chain terminates in
//! a concrete HTTP call, the generated call site builds a
//! [`CallDescriptor`] (method, body, parameter sources, default headers)
//! and hands it, together with the builder, to [`ApiCall::assemble`]. The
//! assembler merges parameter sources, injects default headers without
//! clobbering caller-set ones, normalizes the Content-Type charset and
//! resolves the effective body, producing a [`Request`] for whatever
//! transport the client is wired to. The transport itself, along with
//! pooling, retries and TLS, lives outside this crate.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fluentcall_core::{ApiCall, CallDescriptor, ClientConfig, RequestBuilder};
//! use http::Method;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct CreateUser {
//!     name: String,
//! }
//!
//! # fn main() -> Result<(), fluentcall_core::ClientError> {
//! let config = Arc::new(ClientConfig::default().with_request_charset("UTF-8"));
//! let mut builder = RequestBuilder::new(config);
//! builder.append_path_segment("users");
//!
//! let descriptor = CallDescriptor::new(Method::POST)
//!     .with_body(CreateUser { name: "Alice".into() })
//!     .with_accept("application/json")
//!     .with_content_type("application/json");
//!
//! let call = ApiCall::assemble(descriptor, builder);
//! let request = call.into_request("application/json")?;
//!
//! assert_eq!(request.path(), "users");
//! assert_eq!(
//!     request.headers().get_values("Content-Type"),
//!     ["application/json; charset=UTF-8"]
//! );
//! assert_eq!(request.body(), Some(r#"{"name":"Alice"}"#));
//! # Ok(())
//! # }
//! ```
//!
//! ## Parameter sources
//!
//! A call carries up to four independent payload/parameter sources: query
//! parameters (plain [`ParamMap`] or a typed [`TypedQuery`] object that
//! overrides it), form parameters, ordered multipart [`BodyPart`]s and a
//! raw [`BinaryBody`]. Query and form maps are filtered for empty entries
//! during assembly; multipart parts and the binary payload pass through
//! verbatim.
//!
//! ## Form-encoding fallback
//!
//! When a call has a body, no form parameters, and a Content-Type
//! announcing `application/x-www-form-urlencoded`, body resolution converts
//! the body into form parameters instead of a string payload. See
//! [`ApiCall::resolve_body`].

mod client;

pub use self::client::{
    ACCEPT, ApiCall, BinaryBody, BodyPart, CONTENT_TYPE, CallDescriptor, ClientConfig, ClientError,
    HeaderMap, HttpParam, ParamMap, Payload, Request, RequestBuilder, TypedQuery,
};
