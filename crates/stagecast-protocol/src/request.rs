//! Incoming request envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered field-name to JSON-value mapping carried by requests and responses.
///
/// Backed by `serde_json`'s map with `preserve_order`, so field order on the
/// wire is stable.
pub type RequestData = serde_json::Map<String, Value>;

/// A single operation invocation sent by a client.
///
/// Immutable once parsed; the engine constructs exactly one
/// [`RequestResponse`](crate::RequestResponse) for it and then drops it.
///
/// # Fields
///
/// - `request_type`: exact, case-sensitive handler name
/// - `request_id`: opaque client correlation token, echoed back verbatim
/// - `request_data`: parameter bag, defaults to the empty object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub request_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "RequestData::is_empty")]
    pub request_data: RequestData,
}

impl Request {
    /// Creates a request with an empty parameter bag.
    pub fn new(request_type: impl Into<String>) -> Self {
        Request {
            request_type: request_type.into(),
            request_id: None,
            request_data: RequestData::new(),
        }
    }

    /// Attaches a client correlation id.
    pub fn with_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Replaces the parameter bag.
    pub fn with_data(mut self, request_data: RequestData) -> Self {
        self.request_data = request_data;
        self
    }

    /// Adds one parameter field.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.request_data.insert(name.into(), value);
        self
    }

    /// True when the parameter bag contains `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.request_data.contains_key(name)
    }
}
