//! The single-use handle an aggregation settles.

use crate::{error::AggregationError, outcome::ExecutionOutcome};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;
use tracing::debug;

type Settlement = Result<ExecutionOutcome, AggregationError>;

/// Resolves once the aggregation that created it reaches a terminal state.
///
/// Yields the finished outcome when the stream ended cleanly and an
/// `AggregationError` when the transport failed or the aggregator was
/// dropped first.
#[derive(Debug)]
pub struct ResultFuture {
    rx: oneshot::Receiver<Settlement>,
}

/// The settling side of a `ResultFuture`. Settling consumes it.
#[derive(Debug)]
pub(crate) struct Resolver {
    tx: oneshot::Sender<Settlement>,
}

pub(crate) fn result_channel() -> (Resolver, ResultFuture) {
    let (tx, rx) = oneshot::channel();
    (Resolver { tx }, ResultFuture { rx })
}

impl Resolver {
    pub(crate) fn settle(self, settlement: Settlement) {
        if self.tx.send(settlement).is_err() {
            debug!("Result future was dropped before the aggregation settled");
        }
    }
}

impl Future for ResultFuture {
    type Output = Settlement;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(AggregationError::Abandoned)))
    }
}
