//! Stagecast Request Engine
//!
//! This crate implements the request validation, dispatch, and batching core
//! of the stagecast remote-control interface. It receives parsed request
//! envelopes, validates their parameter bags field by field, resolves named
//! domain objects through the host collaborator, converts settings payloads
//! between JSON and the host's native representation, invokes the matching
//! handler, and packages a uniform success/error result.
//!
//! # Components
//!
//! - [`validation`] — pure field checks over the parameter bag
//! - [`bridge`] — JSON <-> native settings conversions
//! - [`resolver`] — named lookups into the host's scene graph
//! - [`handlers`] — the request surface and its static handler table
//! - [`dispatcher`] — single-request dispatch and outcome normalization
//! - [`batch`] — sequential and parallel batch execution
//! - [`host`] — the collaborator trait the engine consumes
//! - [`config`] — explicit process-wide engine state
//! - [`fakes`] — in-memory host for tests
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use stagecast_core::{config::RuntimeConfig, dispatcher::RequestDispatcher, fakes::MemoryHost};
//! use stagecast_protocol::Request;
//!
//! let host = Arc::new(MemoryHost::new());
//! host.add_scene("Scene");
//!
//! let dispatcher = RequestDispatcher::new(host, Arc::new(RuntimeConfig::new()));
//! let response = dispatcher.dispatch(
//!     &Request::new("GetSceneList").with_id("1"),
//! );
//! assert!(response.is_success());
//! assert_eq!(
//!     response.response_data.unwrap()["scenes"][0]["sceneName"],
//!     json!("Scene"),
//! );
//! ```

pub mod batch;
pub mod bridge;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fakes;
pub mod handlers;
pub mod host;
pub mod resolver;
pub mod validation;

#[cfg(test)]
mod tests;

pub use batch::BatchExecutor;
pub use config::RuntimeConfig;
pub use dispatcher::RequestDispatcher;
pub use error::{HostError, RequestError};
pub use host::MediaHost;
