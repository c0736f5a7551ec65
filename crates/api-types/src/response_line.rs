//! The line-by-line response of a script execution call.

use crate::instruction::Instruction;
use serde::{Deserialize, Serialize};

/// Serialized output produced by executing one instruction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstructionResult {
    pub serialized_instruction_result: String,
}

/// The script failed to parse or compile before any execution began.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InterpretationError {
    pub error_message: String,
}

/// A non-fatal constraint violation found while validating the script plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub error_message: String,
}

/// The script failed at runtime while executing an instruction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecutionError {
    pub error_message: String,
}

impl InterpretationError {
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
        }
    }
}

impl ValidationError {
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
        }
    }
}

impl ExecutionError {
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
        }
    }
}

/// The error payload of a response line. A well-formed engine sets exactly one field.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation_error: Option<InterpretationError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<ValidationError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_error: Option<ExecutionError>,
}

/// One decoded line of a script execution response stream.
///
/// The engine populates at most one of the fields per line. A line with
/// nothing set is valid and carries no information.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<Instruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_result: Option<InstructionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ScriptError>,
}

impl ResponseLine {
    pub fn from_instruction(instruction: Instruction) -> Self {
        Self {
            instruction: Some(instruction),
            ..Self::default()
        }
    }

    pub fn from_instruction_result(serialized_instruction_result: impl Into<String>) -> Self {
        Self {
            instruction_result: Some(InstructionResult {
                serialized_instruction_result: serialized_instruction_result.into(),
            }),
            ..Self::default()
        }
    }

    pub fn from_interpretation_error(error: InterpretationError) -> Self {
        Self::from_error(ScriptError {
            interpretation_error: Some(error),
            ..ScriptError::default()
        })
    }

    pub fn from_validation_error(error: ValidationError) -> Self {
        Self::from_error(ScriptError {
            validation_error: Some(error),
            ..ScriptError::default()
        })
    }

    pub fn from_execution_error(error: ExecutionError) -> Self {
        Self::from_error(ScriptError {
            execution_error: Some(error),
            ..ScriptError::default()
        })
    }

    fn from_error(error: ScriptError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_populate_a_single_field() {
        let line = ResponseLine::from_instruction_result("ok");
        assert!(line.instruction.is_none());
        assert!(line.error.is_none());
        assert_eq!(
            line.instruction_result.unwrap().serialized_instruction_result,
            "ok"
        );

        let line = ResponseLine::from_validation_error(ValidationError::new("bad port"));
        let error = line.error.unwrap();
        assert!(error.interpretation_error.is_none());
        assert!(error.execution_error.is_none());
        assert_eq!(error.validation_error.unwrap().error_message, "bad port");
    }

    #[test]
    fn test_response_line_json_shape() {
        let line = ResponseLine::from_execution_error(ExecutionError::new("boom"));
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"error":{"execution_error":{"error_message":"boom"}}}"#);
    }

    #[test]
    fn test_empty_object_is_an_inert_line() {
        let line: ResponseLine = serde_json::from_str("{}").unwrap();
        assert_eq!(line, ResponseLine::default());
    }
}
