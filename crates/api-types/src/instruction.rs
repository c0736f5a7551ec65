use serde::{Deserialize, Serialize};

/// Where an instruction appears in the script that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstructionPosition {
    pub filename: String,
    pub line: i32,
    pub column: i32,
}

impl InstructionPosition {
    pub fn new(filename: impl Into<String>, line: i32, column: i32) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }
}

/// A single argument passed to an instruction.
///
/// Positional arguments have no `arg_name`; keyword arguments carry the name
/// they were bound to in the script.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstructionArg {
    pub serialized_arg_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
    /// Whether the argument is shown when the instruction is rendered in short form.
    #[serde(default)]
    pub is_representative: bool,
}

impl InstructionArg {
    /// Creates a positional argument.
    pub fn positional(serialized_arg_value: impl Into<String>, is_representative: bool) -> Self {
        Self {
            serialized_arg_value: serialized_arg_value.into(),
            arg_name: None,
            is_representative,
        }
    }

    /// Creates a keyword argument.
    pub fn keyword(
        serialized_arg_value: impl Into<String>,
        arg_name: impl Into<String>,
        is_representative: bool,
    ) -> Self {
        Self {
            serialized_arg_value: serialized_arg_value.into(),
            arg_name: Some(arg_name.into()),
            is_representative,
        }
    }
}

/// One parsed step of a remotely executed script.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<InstructionPosition>,
    pub instruction_name: String,
    /// The instruction rendered back as script source.
    pub executable_instruction: String,
    #[serde(default)]
    pub arguments: Vec<InstructionArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_result: Option<String>,
}

impl Instruction {
    /// Creates an instruction that has not produced a result yet.
    pub fn new(
        position: Option<InstructionPosition>,
        instruction_name: impl Into<String>,
        executable_instruction: impl Into<String>,
        arguments: Vec<InstructionArg>,
    ) -> Self {
        Self {
            position,
            instruction_name: instruction_name.into(),
            executable_instruction: executable_instruction.into(),
            arguments,
            instruction_result: None,
        }
    }

    /// Returns a copy of this instruction carrying `result`.
    ///
    /// Passing `None` clears any result already attached.
    pub fn with_result(&self, result: Option<String>) -> Self {
        Self {
            instruction_result: result,
            ..self.clone()
        }
    }
}
