//! Request dispatch
//!
//! The dispatcher receives a parsed request envelope, selects a handler from
//! the table, measures execution, and normalizes the outcome — success,
//! classified error, or unrecognized request — into the wire response
//! envelope. It assumes the session layer has already authorized the caller.
//!
//! This is the one place generic recovery happens: a handler panic or an
//! unclassifiable host failure becomes `RequestProcessingFailed` with a
//! generic comment, never an unwound stack into the transport. Everything
//! else is explicit validation upstream.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use stagecast_protocol::{Request, RequestResponse, RequestResult, RequestStatus};

use crate::config::RuntimeConfig;
use crate::handlers::{HandlerContext, HandlerTable};
use crate::host::MediaHost;

/// Dispatches single requests against a handler table.
///
/// Holds no per-request state; `dispatch` takes `&self` and is safe to call
/// concurrently from any number of clients or batch workers. The table is
/// read-only after construction.
pub struct RequestDispatcher {
    table: HandlerTable,
    ctx: HandlerContext,
}

impl RequestDispatcher {
    pub fn new(host: Arc<dyn MediaHost>, config: Arc<RuntimeConfig>) -> Self {
        let table = HandlerTable::new();
        let ctx = HandlerContext {
            host,
            config,
            request_names: table.request_names(),
        };
        RequestDispatcher { table, ctx }
    }

    /// Handles one request and produces exactly one response.
    pub fn dispatch(&self, request: &Request) -> RequestResponse {
        debug!(request_type = %request.request_type, "dispatching request");

        let handler = match self.table.get(&request.request_type) {
            Some(handler) => handler,
            None => {
                return RequestResponse::from_result(
                    request.request_type.clone(),
                    request.request_id.clone(),
                    RequestResult::error_with_comment(
                        RequestStatus::UnknownRequestType,
                        format!("The request type `{}` is not recognized.", request.request_type),
                    ),
                );
            }
        };

        let start = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| handler(&self.ctx, request)));
        let elapsed = start.elapsed();

        let result = match outcome {
            Ok(Ok(Some(response_data))) => RequestResult::success_with_data(response_data),
            Ok(Ok(None)) => RequestResult::success(),
            Ok(Err(err)) => err.into_result(),
            Err(panic) => {
                error!(
                    request_type = %request.request_type,
                    "handler panicked: {}",
                    panic_message(&panic)
                );
                RequestResult::error(RequestStatus::RequestProcessingFailed)
            }
        };

        debug!(
            request_type = %request.request_type,
            status = ?result.status,
            elapsed_us = elapsed.as_micros() as u64,
            "request handled"
        );

        let response = RequestResponse::from_result(
            request.request_type.clone(),
            request.request_id.clone(),
            result,
        );

        if self.ctx.config.report_durations {
            response.with_processing_time(elapsed.as_secs_f64() * 1_000.0)
        } else {
            response
        }
    }

    /// Handles one request under a deadline.
    ///
    /// The handler runs on a blocking-capable worker; if the deadline expires
    /// first, the caller gets `RequestProcessingFailed` instead of a hung
    /// transport. The detached worker may still finish; its result is
    /// discarded.
    pub async fn dispatch_with_timeout(
        self: Arc<Self>,
        request: Request,
        deadline: Duration,
    ) -> RequestResponse {
        let request_type = request.request_type.clone();
        let request_id = request.request_id.clone();

        let worker = tokio::task::spawn_blocking(move || self.dispatch(&request));
        match tokio::time::timeout(deadline, worker).await {
            Ok(Ok(response)) => response,
            Ok(Err(join_err)) => {
                warn!(request_type = %request_type, "dispatch worker failed: {join_err}");
                RequestResponse::from_result(
                    request_type,
                    request_id,
                    RequestResult::error(RequestStatus::RequestProcessingFailed),
                )
            }
            Err(_elapsed) => {
                warn!(request_type = %request_type, timeout_ms = deadline.as_millis() as u64, "request timed out");
                RequestResponse::from_result(
                    request_type,
                    request_id,
                    RequestResult::error_with_comment(
                        RequestStatus::RequestProcessingFailed,
                        "The request did not complete in time.",
                    ),
                )
            }
        }
    }

    /// Registered request names, sorted.
    pub fn request_names(&self) -> &[String] {
        &self.ctx.request_names
    }
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
