//! tubby-vm: interpreter for decoded Tubby programs
//!
//! - `Machine` : program + sparse register file + program counter + output sink
//! - `RegisterFile` : zero-defaulted `Word → Word` map
//! - `run_bytes` : decode then run in one call
//!
//! Execution halts only when the program counter leaves the program. GOTO sets
//! the counter directly; an equal TEST skips one instruction; everything else
//! advances by one.
//!
//! ```
//! use tubby_core::{Arg, Instruction, Program};
//! use tubby_vm::Machine;
//!
//! let program = Program::new(vec![
//!     Instruction::Inc { reg: Arg::Literal(0), delta: Arg::Literal(5) },
//!     Instruction::PrintA(Arg::Register(0)),
//! ]);
//! let mut vm = Machine::new(program, Vec::new());
//! assert_eq!(vm.run().unwrap(), 2);
//! assert_eq!(vm.into_output(), b"5");
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

use std::io::Write;

use tubby_core::Program;

pub mod error;
pub mod machine;
pub mod registers;

pub use error::{Error, ExecError, VmResult};
pub use machine::{Machine, State};
pub use registers::RegisterFile;

/// Decodes `bytes` and runs the result to completion, writing to `out`.
///
/// Returns the number of instructions executed. A malformed program fails
/// before any instruction runs.
pub fn run_bytes<W: Write>(bytes: &[u8], out: W) -> Result<u64, Error> {
    let program = Program::from_bytes(bytes)?;
    let mut machine = Machine::new(program, out);
    Ok(machine.run()?)
}
