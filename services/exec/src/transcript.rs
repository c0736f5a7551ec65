//! Replays a recorded response stream through the aggregator.
//!
//! A transcript is JSON lines: each non-blank line is one serialized
//! `ResponseLine`, in the order the engine sent them. End of input is the
//! end of the stream.

use enclave_api_types::ResponseLine;
use enclave_core::{
    AggregationError, ExecutionOutcome, StreamEvent, TransportError, spawn_aggregation,
};
use tokio::{io::AsyncBufRead, io::AsyncBufReadExt, sync::mpsc, task::JoinHandle};
use tokio_stream::{StreamExt, wrappers::LinesStream};
use tracing::{debug, warn};

/// Spawns a task that turns transcript lines into stream events.
///
/// The task stops at the first line it cannot read or decode, after
/// reporting it as a transport failure, or when the receiver goes away.
pub fn spawn_transcript_reader<R>(reader: R, events: mpsc::Sender<StreamEvent>) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = LinesStream::new(reader.lines());
        let mut line_number = 0usize;

        let terminal = loop {
            let Some(next) = lines.next().await else {
                break StreamEvent::End;
            };
            line_number += 1;

            let raw = match next {
                Ok(raw) => raw,
                Err(e) => {
                    break StreamEvent::Failed(TransportError::Stream(format!(
                        "failed to read transcript line {}: {}",
                        line_number, e
                    )));
                }
            };
            if raw.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ResponseLine>(&raw) {
                Ok(line) => {
                    if events.send(StreamEvent::Data(line)).await.is_err() {
                        debug!("Aggregator stopped listening; ending transcript replay");
                        return;
                    }
                }
                Err(e) => {
                    warn!(line_number, error = %e, "Malformed transcript line");
                    break StreamEvent::Failed(TransportError::Decode(format!(
                        "line {}: {}",
                        line_number, e
                    )));
                }
            }
        };

        let _ = events.send(terminal).await;
    })
}

/// Replays a whole transcript and returns the aggregated outcome.
pub async fn replay<R>(
    reader: R,
    channel_capacity: usize,
) -> Result<ExecutionOutcome, AggregationError>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(channel_capacity);
    let reader_task = spawn_transcript_reader(reader, tx);
    spawn_aggregation(rx, reader_task).await
}
