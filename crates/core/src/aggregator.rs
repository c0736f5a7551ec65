//! Reduces a script execution response stream into one `ExecutionOutcome`.
//!
//! The aggregator is a passive state machine. Whatever delivers the stream
//! calls `on_data` for every line in arrival order and then exactly one of
//! `on_end` or `on_error`. Terminal signals after the first are ignored, so
//! a transport that races `end` against `error` settles the result once.
//!
//! Two drivers are provided: `ResponseAggregator::run` consumes
//! `StreamEvent`s from a channel, and `reader::read_stream_until_closed`
//! pulls lines from a `futures::Stream`.

use crate::{
    classifier::classify,
    error::{AggregationError, TransportError},
    outcome::ExecutionOutcome,
    result_future::{Resolver, ResultFuture, result_channel},
};
use enclave_api_types::ResponseLine;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, warn};

/// The underlying stream resource an aggregator owns while it is open.
#[cfg_attr(test, mockall::automock)]
pub trait StreamHandle {
    /// Closes the stream. The aggregator calls this at most once.
    fn release(&mut self);
}

/// A task producing stream events is released by aborting it.
impl<T> StreamHandle for JoinHandle<T> {
    fn release(&mut self) {
        self.abort();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// Lines are still being accepted.
    Open,
    /// The stream ended and the outcome was delivered.
    Closed,
    /// The transport failed and the failure was delivered.
    Failed,
}

/// One signal from the line-delivery transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Data(ResponseLine),
    End,
    Failed(TransportError),
}

pub struct ResponseAggregator<H: StreamHandle> {
    state: AggregatorState,
    outcome: ExecutionOutcome,
    handle: Option<H>,
    resolver: Option<Resolver>,
}

impl<H: StreamHandle> ResponseAggregator<H> {
    /// Starts an aggregation over the stream behind `handle`.
    ///
    /// The returned future settles when the aggregator reaches a terminal
    /// state, or with `AggregationError::Abandoned` if it is dropped first.
    pub fn new(handle: H) -> (Self, ResultFuture) {
        let (resolver, result) = result_channel();
        let aggregator = Self {
            state: AggregatorState::Open,
            outcome: ExecutionOutcome::default(),
            handle: Some(handle),
            resolver: Some(resolver),
        };
        (aggregator, result)
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    /// The stream handle, until it has been released.
    pub fn handle_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    pub fn on_data(&mut self, line: ResponseLine) {
        if self.state != AggregatorState::Open {
            warn!(state = ?self.state, "Dropping response line received after the stream terminated");
            return;
        }
        let classified = classify(line);
        debug!(category = ?classified.category(), "Received response line");
        self.outcome.apply(classified);
    }

    pub fn on_end(&mut self) {
        if self.state != AggregatorState::Open {
            warn!(state = ?self.state, "Ignoring end signal on a terminated stream");
            return;
        }
        self.release_stream();
        self.state = AggregatorState::Closed;

        let outcome = std::mem::take(&mut self.outcome);
        info!(
            instructions = outcome.instructions.len(),
            validation_errors = outcome.validation_errors.len(),
            has_errors = outcome.has_errors(),
            "Response stream closed"
        );
        self.settle(Ok(outcome));
    }

    pub fn on_error(&mut self, err: TransportError) {
        if self.state != AggregatorState::Open {
            warn!(state = ?self.state, error = %err, "Ignoring transport error on a terminated stream");
            return;
        }
        self.release_stream();
        self.state = AggregatorState::Failed;

        error!(error = %err, "Response stream failed");
        self.settle(Err(AggregationError::Transport(err)));
    }

    pub fn handle_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Data(line) => self.on_data(line),
            StreamEvent::End => self.on_end(),
            StreamEvent::Failed(err) => self.on_error(err),
        }
    }

    /// Consumes events until the aggregation terminates.
    ///
    /// A channel that closes before delivering `End` or `Failed` counts as a
    /// transport failure.
    pub async fn run(mut self, mut events: mpsc::Receiver<StreamEvent>) {
        while self.state == AggregatorState::Open {
            match events.recv().await {
                Some(event) => self.handle_event(event),
                None => self.on_error(TransportError::Stream(
                    "event channel closed before the stream ended".to_string(),
                )),
            }
        }
    }

    fn release_stream(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.release();
        }
    }

    fn settle(&mut self, settlement: Result<ExecutionOutcome, AggregationError>) {
        if let Some(resolver) = self.resolver.take() {
            resolver.settle(settlement);
        }
    }
}

impl<H: StreamHandle> Drop for ResponseAggregator<H> {
    fn drop(&mut self) {
        if self.state == AggregatorState::Open {
            warn!("Aggregator dropped while the response stream was still open");
            self.release_stream();
            self.settle(Err(AggregationError::Abandoned));
        }
    }
}

/// Runs an aggregation over `events` on its own task.
pub fn spawn_aggregation<H>(events: mpsc::Receiver<StreamEvent>, handle: H) -> ResultFuture
where
    H: StreamHandle + Send + 'static,
{
    let (aggregator, result) = ResponseAggregator::new(handle);
    tokio::spawn(aggregator.run(events));
    result
}
