//! Request results and the outgoing response envelope
//!
//! A [`RequestResult`] is what a handler produces: a status code, an optional
//! comment, and an optional response payload. A [`RequestResponse`] is that
//! result packaged for the wire, with the originating `requestType` and
//! `requestId` echoed back.
//!
//! # Invariants
//!
//! - `requestStatus.result == true` iff the status code is in the success
//!   subset of the taxonomy.
//! - `responseData` is present only on success.
//! - An error result without a handler-supplied comment is serialized with the
//!   status code's canonical comment.

use serde::{Deserialize, Serialize};

use crate::request::RequestData;
use crate::status::RequestStatus;

/// Outcome of handling one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult {
    pub status: RequestStatus,
    /// Human-readable explanation; empty on success unless informational.
    pub comment: Option<String>,
    /// Response payload; only present on success.
    pub response_data: Option<RequestData>,
}

impl RequestResult {
    /// Creates a success result with no payload.
    pub fn success() -> Self {
        RequestResult {
            status: RequestStatus::Success,
            comment: None,
            response_data: None,
        }
    }

    /// Creates a success result carrying a response payload.
    pub fn success_with_data(response_data: RequestData) -> Self {
        RequestResult {
            status: RequestStatus::Success,
            comment: None,
            response_data: Some(response_data),
        }
    }

    /// Creates an error result with the status code's canonical comment.
    pub fn error(status: RequestStatus) -> Self {
        RequestResult {
            status,
            comment: None,
            response_data: None,
        }
    }

    /// Creates an error result with a handler-specific explanation.
    pub fn error_with_comment(status: RequestStatus, comment: impl Into<String>) -> Self {
        RequestResult {
            status,
            comment: Some(comment.into()),
            response_data: None,
        }
    }

    /// True iff the status code is in the success subset.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// The `requestStatus` object inside a response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestStatusField {
    /// Whether the request succeeded.
    pub result: bool,
    /// Numeric status code from the taxonomy.
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Outgoing response envelope for one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub request_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub request_status: RequestStatusField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_data: Option<RequestData>,
    /// Handler execution time, attached only when duration reporting is
    /// enabled. Observability, not correctness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<f64>,
}

impl RequestResponse {
    /// Packages a handler result into the wire envelope.
    ///
    /// Fills in the canonical comment for error results that carry none, and
    /// drops any payload attached to a non-success result.
    pub fn from_result(
        request_type: impl Into<String>,
        request_id: Option<String>,
        result: RequestResult,
    ) -> Self {
        let success = result.is_success();
        let comment = match result.comment {
            Some(comment) => Some(comment),
            None if !success => Some(result.status.default_comment().to_string()),
            None => None,
        };

        RequestResponse {
            request_type: request_type.into(),
            request_id,
            request_status: RequestStatusField {
                result: success,
                code: result.status.code(),
                comment,
            },
            response_data: if success { result.response_data } else { None },
            processing_time_ms: None,
        }
    }

    /// Attaches a measured execution duration.
    pub fn with_processing_time(mut self, millis: f64) -> Self {
        self.processing_time_ms = Some(millis);
        self
    }

    /// True iff the carried status is in the success subset.
    pub fn is_success(&self) -> bool {
        self.request_status.result
    }
}
