use thiserror::Error;

use crate::bytecode::Opcode;

/// Result alias for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Failures raised while turning raw bytes into a [`Program`](crate::Program).
///
/// Offsets are byte positions from the start of the input and always point at
/// the opcode byte of the offending instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte is not in the opcode table.
    #[error("unknown opcode 0x{byte:02X} at byte offset {offset}")]
    UnknownOpcode {
        /// Raw byte read where an opcode was expected.
        byte: u8,
        /// Position of that byte.
        offset: usize,
    },

    /// Input ended before all argument records of an instruction were read.
    #[error(
        "truncated {opcode} at byte offset {offset}: needs {needed} argument bytes, {remaining} left"
    )]
    Truncated {
        /// Opcode whose arguments are incomplete.
        opcode: Opcode,
        /// Position of the opcode byte.
        offset: usize,
        /// Argument bytes the opcode requires (`2 * arity`).
        needed: usize,
        /// Bytes actually left after the opcode byte.
        remaining: usize,
    },
}

impl DecodeError {
    /// Byte offset of the instruction that failed to decode.
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnknownOpcode { offset, .. } | Self::Truncated { offset, .. } => *offset,
        }
    }
}
