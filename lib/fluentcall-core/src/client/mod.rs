//! Request assembly for fluent, generated REST clients.
//!
//! A call chain accumulates state into a [`RequestBuilder`]; the terminal
//! segment describes the concrete call with a [`CallDescriptor`] and hands
//! both to [`ApiCall::assemble`], which finalizes the request for an
//! external transport.

mod body;
pub use self::body::{BinaryBody, BodyPart, Payload};

mod builder;
pub use self::builder::{Request, RequestBuilder};

mod call;
pub use self::call::{ApiCall, CallDescriptor};

mod config;
pub use self::config::ClientConfig;

mod error;
pub use self::error::ClientError;

mod headers;
pub use self::headers::{ACCEPT, CONTENT_TYPE, HeaderMap};

mod param;
pub use self::param::{HttpParam, ParamMap, TypedQuery};
