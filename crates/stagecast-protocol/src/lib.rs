//! Stagecast Wire Protocol
//!
//! This crate defines the transport-agnostic message types exchanged between a
//! remote-control client and the stagecast request engine.
//!
//! # Overview
//!
//! Clients send named requests with JSON-typed parameters and receive typed,
//! validated responses. A request either succeeds with an optional response
//! payload or fails with a status code from a closed taxonomy; every request
//! yields exactly one response.
//!
//! # Message Shapes
//!
//! - **Request**: `{ requestType, requestId?, requestData? }`
//! - **Response**: `{ requestType, requestId?, requestStatus: { result, code, comment? }, responseData? }`
//! - **Batch in**: `{ requests, haltOnFailure?, executionType? }`
//! - **Batch out**: `{ results }`
//!
//! The transport (framing, compression, TLS, session management) is out of
//! scope here: this crate assumes decoded JSON messages in and accepts JSON
//! messages out.
//!
//! # Example
//!
//! ```
//! use stagecast_protocol::{Request, RequestResult, RequestStatus};
//! use serde_json::json;
//!
//! let request = Request::new("GetInputMute")
//!     .with_id("a1b2")
//!     .with_field("inputName", json!("Mic"));
//!
//! let result = RequestResult::error(RequestStatus::ResourceNotFound);
//! assert!(!result.is_success());
//! ```

pub mod batch;
pub mod request;
pub mod result;
pub mod status;

#[cfg(test)]
mod tests;

pub use batch::{BatchExecutionType, BatchResponse, RequestBatch};
pub use request::{Request, RequestData};
pub use result::{RequestResponse, RequestStatusField, RequestResult};
pub use status::RequestStatus;
