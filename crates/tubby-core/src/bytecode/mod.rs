//! Bytecode model: opcode table, typed instructions and the program container.

/// Opcode bytes and their arity.
pub mod opcode;
/// Arguments and typed instructions.
pub mod instr;
/// Decoded program plus byte-level decode/encode.
pub mod program;

pub use instr::{Arg, Instruction, Operands, LITERAL_TAG, REGISTER_TAG};
pub use opcode::Opcode;
pub use program::Program;
