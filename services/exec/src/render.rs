use crate::config::OutputFormat;
use enclave_core::ExecutionOutcome;
use std::fmt::Write;

/// Renders an outcome the way it is printed to stdout.
pub fn render(outcome: &ExecutionOutcome, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(outcome)),
        OutputFormat::Json => serde_json::to_string_pretty(outcome),
    }
}

fn render_text(outcome: &ExecutionOutcome) -> String {
    let mut out = outcome.script_output.clone();

    // Writing into a String cannot fail.
    if let Some(err) = &outcome.interpretation_error {
        let _ = writeln!(out, "There was an error interpreting the script:");
        let _ = writeln!(out, "{}", err.error_message);
    }
    if !outcome.validation_errors.is_empty() {
        let _ = writeln!(out, "There were errors validating the script:");
        for err in &outcome.validation_errors {
            let _ = writeln!(out, "  - {}", err.error_message);
        }
    }
    if let Some(err) = &outcome.execution_error {
        let _ = writeln!(out, "There was an error executing the script:");
        let _ = writeln!(out, "{}", err.error_message);
    }
    out
}

/// Process exit status for an outcome: 0 when the script reported no errors.
pub fn exit_status(outcome: &ExecutionOutcome) -> u8 {
    if outcome.has_errors() { 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enclave_api_types::{ExecutionError, InterpretationError, ValidationError};

    #[test]
    fn test_render_text_success() {
        let outcome = ExecutionOutcome {
            script_output: "hello\nworld\n".to_string(),
            ..ExecutionOutcome::default()
        };

        assert_eq!(render(&outcome, OutputFormat::Text).unwrap(), "hello\nworld\n");
        assert_eq!(exit_status(&outcome), 0);
    }

    #[test]
    fn test_render_text_lists_every_error() {
        let outcome = ExecutionOutcome {
            script_output: "partial\n".to_string(),
            interpretation_error: Some(InterpretationError::new("bad syntax")),
            validation_errors: vec![
                ValidationError::new("image missing"),
                ValidationError::new("port taken"),
            ],
            execution_error: Some(ExecutionError::new("timed out")),
            ..ExecutionOutcome::default()
        };

        let text = render(&outcome, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "partial\n\
             There was an error interpreting the script:\n\
             bad syntax\n\
             There were errors validating the script:\n  \
             - image missing\n  \
             - port taken\n\
             There was an error executing the script:\n\
             timed out\n"
        );
        assert_eq!(exit_status(&outcome), 1);
    }

    #[test]
    fn test_render_json() {
        let outcome = ExecutionOutcome {
            script_output: "x\n".to_string(),
            ..ExecutionOutcome::default()
        };

        let json = render(&outcome, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["script_output"], "x\n");
        assert_eq!(value["validation_errors"], serde_json::json!([]));
        assert!(value["execution_error"].is_null());
    }
}
