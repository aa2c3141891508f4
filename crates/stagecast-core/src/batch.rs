//! Batch execution
//!
//! Runs an ordered sequence of requests as one client message and assembles
//! an ordered sequence of responses. Three strategies:
//!
//! - **Sequential**: in order, inline on the calling task. Handlers must not
//!   block here; the caller's context is whatever the transport runs on.
//! - **SequentialBlocking**: same ordering, but the whole batch moves to a
//!   context where blocking host calls are acceptable.
//! - **Parallel**: one worker per request, no ordering between side effects;
//!   responses are reassembled in request order by index.
//!
//! With `halt_on_failure`, sequential execution stops at the first failed
//! response and the remaining entries are omitted. Parallel batches ignore
//! the flag: without ordering there is no "remaining" to halt.

use std::sync::Arc;

use futures::future;
use tracing::{debug, warn};

use stagecast_protocol::{
    BatchExecutionType, BatchResponse, RequestBatch, RequestResponse, RequestResult, RequestStatus,
};

use crate::dispatcher::RequestDispatcher;

/// Executes request batches against a shared dispatcher.
#[derive(Clone)]
pub struct BatchExecutor {
    dispatcher: Arc<RequestDispatcher>,
}

impl BatchExecutor {
    pub fn new(dispatcher: Arc<RequestDispatcher>) -> Self {
        BatchExecutor { dispatcher }
    }

    /// Runs one batch to completion and returns the ordered responses.
    pub async fn execute(&self, batch: RequestBatch) -> BatchResponse {
        debug!(
            requests = batch.requests.len(),
            execution_type = ?batch.execution_type,
            halt_on_failure = batch.halt_on_failure,
            "executing request batch"
        );

        match batch.execution_type {
            BatchExecutionType::Sequential => BatchResponse {
                results: run_sequential(&self.dispatcher, &batch),
            },
            BatchExecutionType::SequentialBlocking => {
                let dispatcher = Arc::clone(&self.dispatcher);
                let results =
                    tokio::task::spawn_blocking(move || run_sequential(&dispatcher, &batch))
                        .await
                        .unwrap_or_else(|join_err| {
                            warn!("batch worker failed: {join_err}");
                            Vec::new()
                        });
                BatchResponse { results }
            }
            BatchExecutionType::Parallel => self.run_parallel(batch).await,
        }
    }

    async fn run_parallel(&self, batch: RequestBatch) -> BatchResponse {
        let workers = batch.requests.into_iter().map(|request| {
            let dispatcher = Arc::clone(&self.dispatcher);
            tokio::task::spawn_blocking(move || dispatcher.dispatch(&request))
        });

        // join_all preserves input order, so responses line up with requests
        // by index regardless of completion order.
        let results = future::join_all(workers)
            .await
            .into_iter()
            .map(|joined| {
                joined.unwrap_or_else(|join_err| {
                    warn!("parallel batch worker failed: {join_err}");
                    RequestResponse::from_result(
                        String::new(),
                        None,
                        RequestResult::error(RequestStatus::RequestProcessingFailed),
                    )
                })
            })
            .collect();

        BatchResponse { results }
    }
}

fn run_sequential(dispatcher: &RequestDispatcher, batch: &RequestBatch) -> Vec<RequestResponse> {
    let mut results = Vec::with_capacity(batch.requests.len());
    for request in &batch.requests {
        let response = dispatcher.dispatch(request);
        let failed = !response.is_success();
        results.push(response);
        if failed && batch.halt_on_failure {
            debug!(
                executed = results.len(),
                total = batch.requests.len(),
                "batch halted on failure"
            );
            break;
        }
    }
    results
}
