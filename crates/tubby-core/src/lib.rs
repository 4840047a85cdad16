//! tubby-core: shared primitives of the Tubby machine
//!
//! Provides:
//! - `Opcode` and its static arity table
//! - `Arg` (literal or register reference) and the typed `Instruction` enum
//! - `Program`: decoding from the flat byte format, and encoding back to it
//! - `DecodeError` + alias `DecodeResult<T>`
//!
//! Byte format:
//! ```text
//! program     := instruction*
//! instruction := opcode arg{arity(opcode)}
//! arg         := tag value          (tag 0x45 = literal, anything else = register)
//! ```
//!
//! Nothing here executes code; see `tubby-vm`.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

/* ─────────────────────────── Modules ─────────────────────────── */

/// Bytecode model (opcodes, instructions, programs).
pub mod bytecode;

/// Decode errors.
pub mod error;

pub use bytecode::{Arg, Instruction, Opcode, Operands, Program, LITERAL_TAG, REGISTER_TAG};
pub use error::{DecodeError, DecodeResult};

/* ─────────────────────────── Machine word ─────────────────────────── */

/// Integer type held by registers and produced by operand resolution.
pub type Word = i64;

/* ─────────────────────────── Prelude ─────────────────────────── */

/// Convenience re-exports.
pub mod prelude {
    pub use super::{
        Arg, DecodeError, DecodeResult, Instruction, Opcode, Operands, Program, Word, LITERAL_TAG,
        REGISTER_TAG,
    };
}
