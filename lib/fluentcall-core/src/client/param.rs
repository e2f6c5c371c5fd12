use indexmap::IndexMap;
use serde::Serialize;

use crate::client::error::ClientError;

/// Ordered map from parameter name to [`HttpParam`].
///
/// Used for both query and form parameters. Insertion order is preserved
/// all the way to the wire.
pub type ParamMap = IndexMap<String, HttpParam>;

/// A query or form parameter: a single, possibly absent value or an ordered
/// collection of values.
///
/// Absent singles and empty collections report themselves as empty and are
/// filtered out during assembly; the empty string is a regular value and is
/// kept.
///
/// # Examples
///
/// ```rust
/// use fluentcall_core::HttpParam;
///
/// assert!(HttpParam::single("").non_empty());
/// assert!(!HttpParam::none().non_empty());
/// assert!(!HttpParam::repeated(Vec::<String>::new()).non_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpParam {
    /// A single value, or no value at all.
    Single(Option<String>),
    /// An ordered collection of values, repeated on the wire.
    Repeated(Vec<String>),
}

impl HttpParam {
    /// Creates a parameter carrying a single value.
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(Some(value.into()))
    }

    /// Creates a parameter carrying no value.
    ///
    /// Such a parameter is dropped when the assembler filters parameter maps.
    #[must_use]
    pub fn none() -> Self {
        Self::Single(None)
    }

    /// Creates a parameter carrying an ordered collection of values.
    pub fn repeated<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Repeated(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` when this parameter carries data.
    #[must_use]
    pub fn non_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_some(),
            Self::Repeated(values) => !values.is_empty(),
        }
    }

    /// Iterates over the carried values, in order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            Self::Single(value) => value.as_slice(),
            Self::Repeated(values) => values.as_slice(),
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for HttpParam {
    fn from(value: &str) -> Self {
        Self::single(value)
    }
}

impl From<String> for HttpParam {
    fn from(value: String) -> Self {
        Self::single(value)
    }
}

impl From<Vec<String>> for HttpParam {
    fn from(values: Vec<String>) -> Self {
        Self::Repeated(values)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for HttpParam {
                fn from(value: $ty) -> Self {
                    Self::single(value.to_string())
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, i64, u32, u64, f64);

/// The typed query-string object of a call.
///
/// Wraps a parameter map derived from a `Serialize` value. When a descriptor
/// carries a `TypedQuery`, it overrides the plain query-parameter map
/// outright, even a non-empty one.
///
/// # Examples
///
/// ```rust
/// use fluentcall_core::{HttpParam, TypedQuery};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Search {
///     term: String,
///     page: u32,
/// }
///
/// # fn main() -> Result<(), fluentcall_core::ClientError> {
/// let query = TypedQuery::of(&Search { term: "rust".into(), page: 2 })?;
/// assert_eq!(query.params().get("page"), Some(&HttpParam::single("2")));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedQuery {
    params: ParamMap,
}

impl TypedQuery {
    /// Derives a typed query from any serializable value.
    ///
    /// The value must serialize to a JSON object; its fields become the
    /// query parameters.
    pub fn of<T: Serialize>(value: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(value)?;
        let params = params_from_value(value)?;
        Ok(Self { params })
    }

    /// The derived parameter map.
    #[must_use]
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// Consumes the query, yielding the derived parameter map.
    #[must_use]
    pub fn into_params(self) -> ParamMap {
        self.params
    }
}

/// Flattens a JSON object into a parameter map.
///
/// Nulls become absent parameters, scalars become single values, arrays of
/// scalars become repeated values. Nested arrays and objects are not
/// representable as parameters.
pub(crate) fn params_from_value(value: serde_json::Value) -> Result<ParamMap, ClientError> {
    let serde_json::Value::Object(entries) = value else {
        return Err(ClientError::UnsupportedParameterValue {
            message: "parameter encoding requires a top-level object".to_string(),
            value,
        });
    };

    let mut params = ParamMap::with_capacity(entries.len());
    for (name, value) in entries {
        params.insert(name, param_from_json(value)?);
    }
    Ok(params)
}

fn param_from_json(value: serde_json::Value) -> Result<HttpParam, ClientError> {
    let param = match value {
        serde_json::Value::Null => HttpParam::none(),
        serde_json::Value::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(scalar_to_string(item)?);
            }
            HttpParam::Repeated(values)
        }
        other => HttpParam::single(scalar_to_string(other)?),
    };
    Ok(param)
}

fn scalar_to_string(value: serde_json::Value) -> Result<String, ClientError> {
    match value {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Bool(flag) => Ok(flag.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Err(ClientError::UnsupportedParameterValue {
                message: "nested complex values not supported in parameters".to_string(),
                value,
            })
        }
    }
}
