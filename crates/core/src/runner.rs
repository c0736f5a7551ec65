//! The seam between the SDK and whatever transport talks to the engine.

use crate::{
    error::{AggregationError, TransportError},
    outcome::ExecutionOutcome,
    reader::{ResponseLineStream, read_stream_until_closed},
};
use async_trait::async_trait;
use enclave_api_types::{ExecuteModuleArgs, ExecuteScriptArgs};
use tracing::{info, instrument};

/// Starts script executions on a remote engine.
///
/// Implementations own the connection. They only have to hand back the
/// decoded response lines in the order the engine sent them.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Submits a serialized script and returns its response stream.
    async fn run_script(&self, args: ExecuteScriptArgs)
    -> Result<ResponseLineStream, TransportError>;

    /// Submits a script module and returns its response stream.
    async fn run_module(&self, args: ExecuteModuleArgs)
    -> Result<ResponseLineStream, TransportError>;
}

/// Executes a script and waits for the complete outcome.
#[instrument(skip_all, fields(dry_run = ?args.dry_run))]
pub async fn execute_script(
    runner: &dyn ScriptRunner,
    args: ExecuteScriptArgs,
) -> Result<ExecutionOutcome, AggregationError> {
    info!("Executing script");
    let lines = runner.run_script(args).await?;
    read_stream_until_closed(lines).await
}

/// Executes a module and waits for the complete outcome.
#[instrument(skip_all, fields(module_id = %args.module_id, dry_run = ?args.dry_run))]
pub async fn execute_module(
    runner: &dyn ScriptRunner,
    args: ExecuteModuleArgs,
) -> Result<ExecutionOutcome, AggregationError> {
    info!("Executing module");
    let lines = runner.run_module(args).await?;
    read_stream_until_closed(lines).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use enclave_api_types::{ExecutionError, ResponseLine};
    use futures::stream;

    /// Answers every script with the same canned lines and refuses modules.
    struct CannedRunner {
        lines: Vec<Result<ResponseLine, TransportError>>,
    }

    #[async_trait]
    impl ScriptRunner for CannedRunner {
        async fn run_script(
            &self,
            _args: ExecuteScriptArgs,
        ) -> Result<ResponseLineStream, TransportError> {
            Ok(Box::pin(stream::iter(self.lines.clone())))
        }

        async fn run_module(
            &self,
            args: ExecuteModuleArgs,
        ) -> Result<ResponseLineStream, TransportError> {
            Err(TransportError::Connect(format!(
                "module '{}' unavailable",
                args.module_id
            )))
        }
    }

    #[tokio::test]
    async fn test_execute_script_aggregates_stream() {
        let runner = CannedRunner {
            lines: vec![
                Ok(ResponseLine::from_instruction_result("started")),
                Ok(ResponseLine::from_execution_error(ExecutionError::new(
                    "port in use",
                ))),
            ],
        };

        let outcome = execute_script(&runner, ExecuteScriptArgs::new("main()", false))
            .await
            .unwrap();
        assert_eq!(outcome.script_output, "started\n");
        assert_eq!(outcome.execution_error, Some(ExecutionError::new("port in use")));
    }

    #[tokio::test]
    async fn test_connect_failure_is_a_transport_failure() {
        let runner = CannedRunner { lines: vec![] };

        let result = execute_module(
            &runner,
            ExecuteModuleArgs::remote("github.com/org/module", "{}", true),
        )
        .await;
        assert_eq!(
            result,
            Err(AggregationError::Transport(TransportError::Connect(
                "module 'github.com/org/module' unavailable".to_string()
            )))
        );
    }
}
