use std::io;

use thiserror::Error;
use tubby_core::{DecodeError, Word};

/// Result alias for execution.
pub type VmResult<T> = Result<T, ExecError>;

/// Run-time failures. Leaving the program is not one of them.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The output sink rejected a write.
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    /// PRINTB operand is not a Unicode scalar value.
    #[error("PRINTB at pc {pc}: {value} is not a valid character code point")]
    InvalidCodePoint {
        /// Resolved operand.
        value: Word,
        /// Index of the PRINTB instruction.
        pc: usize,
    },
}

/// Decode-then-run failures, as returned by [`run_bytes`](crate::run_bytes).
#[derive(Debug, Error)]
pub enum Error {
    /// Program bytes were malformed; nothing was executed.
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),

    /// Execution stopped on a fatal condition.
    #[error("exec: {0}")]
    Exec(#[from] ExecError),
}
