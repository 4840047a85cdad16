//! Execution engine: fetch, resolve, dispatch, advance.

use std::io::Write;

use tracing::{debug, trace};
use tubby_core::{Arg, Instruction, Program, Word};

use crate::{
    error::{ExecError, VmResult},
    registers::RegisterFile,
};

/// Whether the machine can still execute instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// `pc` points inside the program.
    Running,
    /// `pc` left the program; this is the only normal termination.
    Halted,
}

/// How the program counter moves after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// `pc + 1`
    Next,
    /// `pc + 2` (TEST with equal operands)
    Skip,
    /// `pc = target` (GOTO)
    Jump(Word),
}

/// One program run: owns the program, the register file, the counter and the
/// output sink. Not resettable.
pub struct Machine<W> {
    program: Program,
    registers: RegisterFile,
    pc: usize,
    steps: u64,
    out: W,
}

impl<W: Write> Machine<W> {
    /// Fresh machine at `pc = 0` with every register at zero.
    pub fn new(program: Program, out: W) -> Self {
        Self { program, registers: RegisterFile::new(), pc: 0, steps: 0, out }
    }

    /// Executes at most one instruction.
    ///
    /// Returns [`State::Halted`] without doing anything once `pc` is out of
    /// bounds, and also right after the instruction that moved it there.
    pub fn step(&mut self) -> VmResult<State> {
        let Some(instr) = self.program.get(self.pc) else {
            return Ok(State::Halted);
        };
        trace!(pc = self.pc, instr = %instr, "step");

        let flow = self.exec(instr)?;
        self.pc = self.next_pc(flow);
        self.steps += 1;

        Ok(if self.is_halted() { State::Halted } else { State::Running })
    }

    /// Steps until the counter leaves the program. Returns the number of
    /// instructions executed by this call.
    ///
    /// A program whose jumps form a cycle never returns.
    pub fn run(&mut self) -> VmResult<u64> {
        let start = self.steps;
        while self.step()? == State::Running {}
        debug!(steps = self.steps, pc = self.pc, "halted");
        Ok(self.steps - start)
    }

    fn exec(&mut self, instr: Instruction) -> VmResult<Flow> {
        match instr {
            Instruction::Inc { reg, delta } => {
                let (id, delta) = (self.resolve(reg), self.resolve(delta));
                self.registers.add(id, delta);
            }
            Instruction::Dec { reg, delta } => {
                let (id, delta) = (self.resolve(reg), self.resolve(delta));
                self.registers.sub(id, delta);
            }
            Instruction::PrintA(value) => {
                let value = self.resolve(value);
                write!(self.out, "{value}")?;
                self.out.flush()?;
            }
            Instruction::PrintB(value) => {
                let value = self.resolve(value);
                let c = u32::try_from(value)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(ExecError::InvalidCodePoint { value, pc: self.pc })?;
                let mut buf = [0u8; 4];
                self.out.write_all(c.encode_utf8(&mut buf).as_bytes())?;
                self.out.flush()?;
            }
            Instruction::Goto(target) => return Ok(Flow::Jump(self.resolve(target))),
            Instruction::Test(a, b) => {
                if self.resolve(a) == self.resolve(b) {
                    return Ok(Flow::Skip);
                }
            }
        }
        Ok(Flow::Next)
    }

    fn next_pc(&self, flow: Flow) -> usize {
        match flow {
            Flow::Next => self.pc.saturating_add(1),
            Flow::Skip => self.pc.saturating_add(2),
            // negative targets leave the program
            Flow::Jump(target) => usize::try_from(target).unwrap_or(self.program.len()),
        }
    }
}

impl<W> Machine<W> {
    /// Literal as-is, register by current content.
    fn resolve(&self, arg: Arg) -> Word {
        match arg {
            Arg::Literal(v) => Word::from(v),
            Arg::Register(r) => self.registers.get(Word::from(r)),
        }
    }

    /// Index of the next instruction to execute.
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// Instructions executed so far.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// True once `pc` is outside the program.
    pub fn is_halted(&self) -> bool {
        self.pc >= self.program.len()
    }

    /// Register file as left by the instructions executed so far.
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// The program being executed.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// The output sink.
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Gives the output sink back, dropping the machine.
    pub fn into_output(self) -> W {
        self.out
    }
}

/* ─────────────────────────── Tests ─────────────────────────── */
