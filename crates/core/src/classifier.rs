//! Sorting decoded response lines into the kinds the aggregator understands.

use enclave_api_types::{
    ExecutionError, Instruction, InterpretationError, ResponseLine, ValidationError,
};

/// The kind of a response line, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Instruction,
    InstructionResult,
    InterpretationError,
    ValidationError,
    ExecutionError,
    /// Nothing recognisable was set. Such lines are skipped.
    Unclassified,
}

/// A response line reduced to the single payload it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    Instruction(Instruction),
    /// The serialized result text of one instruction.
    InstructionResult(String),
    InterpretationError(InterpretationError),
    ValidationError(ValidationError),
    ExecutionError(ExecutionError),
    Unclassified,
}

impl ClassifiedLine {
    pub fn category(&self) -> Category {
        match self {
            ClassifiedLine::Instruction(_) => Category::Instruction,
            ClassifiedLine::InstructionResult(_) => Category::InstructionResult,
            ClassifiedLine::InterpretationError(_) => Category::InterpretationError,
            ClassifiedLine::ValidationError(_) => Category::ValidationError,
            ClassifiedLine::ExecutionError(_) => Category::ExecutionError,
            ClassifiedLine::Unclassified => Category::Unclassified,
        }
    }
}

/// Classifies a response line.
///
/// If a line has more than one field set, the first match wins in this
/// order: instruction, instruction result, then the error payload
/// (interpretation, validation, execution).
pub fn classify(line: ResponseLine) -> ClassifiedLine {
    let ResponseLine {
        instruction,
        instruction_result,
        error,
    } = line;

    if let Some(instruction) = instruction {
        return ClassifiedLine::Instruction(instruction);
    }
    if let Some(result) = instruction_result {
        return ClassifiedLine::InstructionResult(result.serialized_instruction_result);
    }
    let Some(error) = error else {
        return ClassifiedLine::Unclassified;
    };

    if let Some(err) = error.interpretation_error {
        ClassifiedLine::InterpretationError(err)
    } else if let Some(err) = error.validation_error {
        ClassifiedLine::ValidationError(err)
    } else if let Some(err) = error.execution_error {
        ClassifiedLine::ExecutionError(err)
    } else {
        ClassifiedLine::Unclassified
    }
}
