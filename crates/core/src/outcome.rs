use crate::classifier::ClassifiedLine;
use enclave_api_types::{ExecutionError, Instruction, InterpretationError, ValidationError};
use serde::Serialize;
use tracing::{trace, warn};

/// The outcome as a plain tuple, in the order the engine API documents it.
pub type OutcomeParts = (
    String,
    Vec<Instruction>,
    Option<InterpretationError>,
    Vec<ValidationError>,
    Option<ExecutionError>,
);

/// Everything a finished script execution stream reported.
///
/// Script failures are recorded here alongside whatever output was
/// produced before them; they never cut the stream short.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Every instruction result text, each followed by a newline, in arrival order.
    pub script_output: String,
    pub instructions: Vec<Instruction>,
    pub interpretation_error: Option<InterpretationError>,
    pub validation_errors: Vec<ValidationError>,
    pub execution_error: Option<ExecutionError>,
}

impl ExecutionOutcome {
    /// Folds one classified line into the outcome.
    ///
    /// A second interpretation or execution error replaces the first.
    pub(crate) fn apply(&mut self, line: ClassifiedLine) {
        match line {
            ClassifiedLine::Instruction(instruction) => self.instructions.push(instruction),
            ClassifiedLine::InstructionResult(text) => {
                self.script_output.push_str(&text);
                self.script_output.push('\n');
            }
            ClassifiedLine::InterpretationError(err) => {
                if let Some(previous) = self.interpretation_error.replace(err) {
                    warn!(
                        previous = %previous.error_message,
                        "Replacing an earlier interpretation error"
                    );
                }
            }
            ClassifiedLine::ValidationError(err) => self.validation_errors.push(err),
            ClassifiedLine::ExecutionError(err) => {
                if let Some(previous) = self.execution_error.replace(err) {
                    warn!(
                        previous = %previous.error_message,
                        "Replacing an earlier execution error"
                    );
                }
            }
            ClassifiedLine::Unclassified => trace!("Skipping response line with no payload"),
        }
    }

    /// True when the script reported any interpretation, validation or execution error.
    pub fn has_errors(&self) -> bool {
        self.interpretation_error.is_some()
            || !self.validation_errors.is_empty()
            || self.execution_error.is_some()
    }

    pub fn into_parts(self) -> OutcomeParts {
        (
            self.script_output,
            self.instructions,
            self.interpretation_error,
            self.validation_errors,
            self.execution_error,
        )
    }
}
