//! Wire shapes for the enclave engine's script execution API.
//!
//! These types mirror the decoded messages exchanged with the engine. They
//! carry no behaviour beyond construction helpers; encoding to and from the
//! transport format is the transport's job. All types are `serde`
//! serializable so a recorded JSON transcript can stand in for a live stream.

pub mod args;
pub mod instruction;
pub mod response_line;

pub use args::{ExecuteModuleArgs, ExecuteScriptArgs, ModuleContent};
pub use instruction::{Instruction, InstructionArg, InstructionPosition};
pub use response_line::{
    ExecutionError, InstructionResult, InterpretationError, ResponseLine, ScriptError,
    ValidationError,
};
