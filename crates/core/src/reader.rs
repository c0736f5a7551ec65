use crate::{
    aggregator::{ResponseAggregator, StreamHandle},
    error::{AggregationError, TransportError},
    outcome::ExecutionOutcome,
};
use enclave_api_types::ResponseLine;
use futures::{Stream, StreamExt};
use std::pin::Pin;

/// A stream of decoded response lines, as handed out by a transport.
pub type ResponseLineStream =
    Pin<Box<dyn Stream<Item = Result<ResponseLine, TransportError>> + Send>>;

/// Owns a line stream on behalf of an aggregator. Releasing it drops the stream.
struct OwnedLines<S> {
    lines: Option<S>,
}

impl<S> OwnedLines<S> {
    fn get_mut(&mut self) -> Option<&mut S> {
        self.lines.as_mut()
    }
}

impl<S> StreamHandle for OwnedLines<S> {
    fn release(&mut self) {
        self.lines = None;
    }
}

/// Reads `lines` to exhaustion and returns what the script reported.
///
/// Exhausting the stream is the end signal. The first `Err` item is a
/// transport failure and stops reading; the stream is dropped either way.
pub async fn read_stream_until_closed<S>(lines: S) -> Result<ExecutionOutcome, AggregationError>
where
    S: Stream<Item = Result<ResponseLine, TransportError>> + Unpin,
{
    let (mut aggregator, result) = ResponseAggregator::new(OwnedLines { lines: Some(lines) });

    while let Some(lines) = aggregator.handle_mut().and_then(OwnedLines::get_mut) {
        let next = lines.next().await;
        match next {
            Some(Ok(line)) => aggregator.on_data(line),
            Some(Err(err)) => aggregator.on_error(err),
            None => aggregator.on_end(),
        }
    }

    result.await
}
