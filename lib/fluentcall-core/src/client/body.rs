use std::path::PathBuf;

use serde::Serialize;

use crate::client::error::ClientError;
use crate::client::param::{ParamMap, params_from_value};

/// Capabilities the assembler needs from a request body type.
///
/// The two operations mirror the external collaborators of request assembly:
/// a body serializer producing a string payload for a canonical content
/// type, and a parameter encoder turning the body into form parameters for
/// the `application/x-www-form-urlencoded` fallback.
///
/// A blanket implementation covers every `Serialize` type, backed by
/// `serde_json`. Serialization failures surface unchanged as
/// [`ClientError`].
pub trait Payload {
    /// Serializes the body into a string payload for the given canonical
    /// content type.
    fn write_body_to_string(&self, canonical_content_type: &str) -> Result<String, ClientError>;

    /// Converts the body into form-encoded key/value parameters.
    ///
    /// Fails unless the body serializes to a flat object.
    fn to_form_urlencoded(&self) -> Result<ParamMap, ClientError>;
}

impl<T: Serialize> Payload for T {
    fn write_body_to_string(&self, _canonical_content_type: &str) -> Result<String, ClientError> {
        // Vendor `+json` media types all share the one JSON writer.
        let body = serde_json::to_string(self)?;
        Ok(body)
    }

    fn to_form_urlencoded(&self) -> Result<ParamMap, ClientError> {
        let value = serde_json::to_value(self)?;
        params_from_value(value)
    }
}

/// One ordered part of a multipart request.
///
/// Parts are carried through assembly verbatim, in the order the call site
/// supplies them; encoding the multipart body is the transport's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPart {
    /// A textual form field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
        /// Content type of the part, when not the multipart default.
        content_type: Option<String>,
        /// Charset of the part value.
        charset: Option<String>,
    },
    /// An in-memory binary part.
    Bytes {
        /// Field name.
        name: String,
        /// Raw part content.
        data: Vec<u8>,
        /// Content type of the part.
        content_type: Option<String>,
        /// File name reported in the part disposition.
        file_name: Option<String>,
    },
    /// A part read from the filesystem by the transport.
    File {
        /// Field name.
        name: String,
        /// Path of the file to upload.
        path: PathBuf,
        /// Content type of the part.
        content_type: Option<String>,
        /// File name reported in the part disposition; defaults to the
        /// path's file name.
        file_name: Option<String>,
    },
}

impl BodyPart {
    /// Creates a textual form field part.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
            content_type: None,
            charset: None,
        }
    }

    /// Creates an in-memory binary part.
    pub fn bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Bytes {
            name: name.into(),
            data,
            content_type: None,
            file_name: None,
        }
    }

    /// Creates a filesystem-backed part.
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
            content_type: None,
            file_name: None,
        }
    }

    /// Sets the content type of this part.
    #[must_use]
    pub fn with_content_type(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Text { content_type, .. }
            | Self::Bytes { content_type, .. }
            | Self::File { content_type, .. } => *content_type = Some(value.into()),
        }
        self
    }

    /// The field name of this part.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::Bytes { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// A raw binary payload, carried through assembly verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryBody {
    /// In-memory bytes.
    Bytes(Vec<u8>),
    /// Text sent as-is, without serialization.
    Text(String),
    /// A file read by the transport.
    File(PathBuf),
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::client::param::HttpParam;

    #[derive(Serialize)]
    struct Login {
        username: String,
        password: String,
    }

    #[test]
    fn test_write_body_to_string_is_json() {
        let login = Login {
            username: "user@example.com".into(),
            password: "secret".into(),
        };

        let body = login
            .write_body_to_string("application/json")
            .expect("should serialize");
        assert_eq!(
            body,
            r#"{"username":"user@example.com","password":"secret"}"#
        );
    }

    #[test]
    fn test_to_form_urlencoded_flattens_object() {
        let login = Login {
            username: "user".into(),
            password: "secret".into(),
        };

        let params = login.to_form_urlencoded().expect("should encode");
        assert_eq!(params.get("username"), Some(&HttpParam::single("user")));
        assert_eq!(params.get("password"), Some(&HttpParam::single("secret")));
    }

    #[test]
    fn test_to_form_urlencoded_rejects_scalar_body() {
        let result = 42_u32.to_form_urlencoded();
        assert!(matches!(
            result,
            Err(ClientError::UnsupportedParameterValue { .. })
        ));
    }

    #[test]
    fn test_body_part_constructors() {
        let part = BodyPart::text("title", "My Document").with_content_type("text/plain");
        assert_eq!(part.name(), "title");
        assert_eq!(
            part,
            BodyPart::Text {
                name: "title".into(),
                value: "My Document".into(),
                content_type: Some("text/plain".into()),
                charset: None,
            }
        );

        let part = BodyPart::bytes("attachment", vec![0xFF, 0xFE]);
        assert_eq!(part.name(), "attachment");

        let part = BodyPart::file("report", "/tmp/report.pdf");
        assert_eq!(part.name(), "report");
    }
}
