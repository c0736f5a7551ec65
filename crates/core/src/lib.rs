//! Script execution response handling for the enclave SDK.
//!
//! A script execution call answers with a stream of response lines. This
//! crate reduces that stream into a single `ExecutionOutcome`:
//!
//! - `classifier`: decides what kind of payload a line carries.
//! - `aggregator`: the state machine that folds lines into the outcome and
//!   owns the stream until it terminates.
//! - `result_future`: the handle the caller awaits for the outcome.
//! - `reader`: drives an aggregator from a `futures::Stream`.
//! - `runner`: the transport seam and one-call execute helpers.

pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod outcome;
pub mod reader;
pub mod result_future;
pub mod runner;

pub use aggregator::{
    AggregatorState, ResponseAggregator, StreamEvent, StreamHandle, spawn_aggregation,
};
pub use classifier::{Category, ClassifiedLine, classify};
pub use error::{AggregationError, TransportError};
pub use outcome::{ExecutionOutcome, OutcomeParts};
pub use reader::{ResponseLineStream, read_stream_until_closed};
pub use result_future::ResultFuture;
pub use runner::{ScriptRunner, execute_module, execute_script};
