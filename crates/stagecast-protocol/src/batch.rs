//! Request batches
//!
//! A batch bundles an ordered sequence of requests into one client message and
//! produces one ordered sequence of responses. How the requests execute is
//! chosen by [`BatchExecutionType`]; whether a failure aborts the remainder is
//! chosen by `halt_on_failure`.

use serde::{Deserialize, Serialize};

use crate::request::Request;
use crate::result::RequestResponse;

/// Execution strategy for a request batch.
///
/// Serialized as an integer: `-1` (unspecified, treated as sequential), `0`
/// sequential on the calling context, `1` sequential on a context that may
/// block, `2` parallel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(into = "i8", try_from = "i8")]
pub enum BatchExecutionType {
    /// Requests run one at a time, in order, on the caller's context.
    /// Handlers must not block here.
    #[default]
    Sequential,
    /// Same ordering guarantee, executed where blocking calls are acceptable.
    SequentialBlocking,
    /// Requests run concurrently with no ordering between their side effects.
    /// Responses are still returned in request order, by index.
    ///
    /// `halt_on_failure` is meaningless without ordering and is ignored for
    /// parallel batches; the response sequence is always full length.
    Parallel,
}

impl From<BatchExecutionType> for i8 {
    fn from(execution_type: BatchExecutionType) -> i8 {
        match execution_type {
            BatchExecutionType::Sequential => 0,
            BatchExecutionType::SequentialBlocking => 1,
            BatchExecutionType::Parallel => 2,
        }
    }
}

impl TryFrom<i8> for BatchExecutionType {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 | 0 => Ok(BatchExecutionType::Sequential),
            1 => Ok(BatchExecutionType::SequentialBlocking),
            2 => Ok(BatchExecutionType::Parallel),
            other => Err(format!("unknown batch execution type: {other}")),
        }
    }
}

/// An ordered sequence of requests executed as one client message.
///
/// # Halt policy
///
/// With `halt_on_failure`, processing stops at the first response whose status
/// is not in the success subset; responses already produced are returned and
/// the remaining entries are omitted entirely (never padded with placeholder
/// results). Without it, every request runs and the response sequence always
/// matches the request sequence in length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestBatch {
    pub requests: Vec<Request>,
    #[serde(default)]
    pub halt_on_failure: bool,
    #[serde(default)]
    pub execution_type: BatchExecutionType,
}

impl RequestBatch {
    pub fn new(requests: Vec<Request>) -> Self {
        RequestBatch {
            requests,
            halt_on_failure: false,
            execution_type: BatchExecutionType::Sequential,
        }
    }

    pub fn halt_on_failure(mut self, halt: bool) -> Self {
        self.halt_on_failure = halt;
        self
    }

    pub fn execution_type(mut self, execution_type: BatchExecutionType) -> Self {
        self.execution_type = execution_type;
        self
    }
}

/// Ordered responses for one batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchResponse {
    pub results: Vec<RequestResponse>,
}
