//! Engine error types
//!
//! Two layers of failure exist in the engine:
//!
//! - [`RequestError`]: a classified, client-facing failure carrying a status
//!   code from the protocol taxonomy. Validation and resolution produce these
//!   directly; handlers propagate them with `?`.
//! - [`HostError`]: a failure reported by the host collaborator. Classifiable
//!   host failures map onto the taxonomy; anything else is downgraded to
//!   `RequestProcessingFailed` at the dispatch boundary rather than unwinding
//!   into the transport.

use thiserror::Error;

use stagecast_protocol::{RequestResult, RequestStatus};

/// A classified request failure.
///
/// Converts losslessly into an error [`RequestResult`]; the canonical comment
/// for the status code is substituted later, at envelope assembly, when no
/// specific comment was attached.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("request failed with status {status:?}")]
pub struct RequestError {
    pub status: RequestStatus,
    pub comment: Option<String>,
}

impl RequestError {
    pub fn new(status: RequestStatus) -> Self {
        RequestError {
            status,
            comment: None,
        }
    }

    pub fn with_comment(status: RequestStatus, comment: impl Into<String>) -> Self {
        RequestError {
            status,
            comment: Some(comment.into()),
        }
    }

    pub fn into_result(self) -> RequestResult {
        match self.comment {
            Some(comment) => RequestResult::error_with_comment(self.status, comment),
            None => RequestResult::error(self.status),
        }
    }
}

/// Failure reported by the [`MediaHost`](crate::host::MediaHost) collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    #[error("no source found by the name {0:?}")]
    NotFound(String),

    #[error("a source already exists by the name {0:?}")]
    AlreadyExists(String),

    #[error("unknown input kind {0:?}")]
    InvalidKind(String),

    #[error("resource creation failed: {0}")]
    CreationFailed(String),

    #[error("internal host failure: {0}")]
    Internal(String),
}

impl From<HostError> for RequestError {
    fn from(err: HostError) -> Self {
        let status = match &err {
            HostError::NotFound(_) => RequestStatus::ResourceNotFound,
            HostError::AlreadyExists(_) => RequestStatus::ResourceAlreadyExists,
            HostError::InvalidKind(_) => RequestStatus::InvalidInputKind,
            HostError::CreationFailed(_) => RequestStatus::ResourceCreationFailed,
            HostError::Internal(_) => RequestStatus::RequestProcessingFailed,
        };
        RequestError::with_comment(status, err.to_string())
    }
}
