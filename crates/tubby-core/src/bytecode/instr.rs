use core::fmt;

use smallvec::{smallvec, SmallVec};

use crate::bytecode::opcode::Opcode;

/// Tag byte marking a literal argument record.
pub const LITERAL_TAG: u8 = 0x45;
/// Tag byte written for register references. Any non-literal tag decodes as one.
pub const REGISTER_TAG: u8 = 0x56;

/// Operand list of an instruction, in encoding order.
pub type Operands = SmallVec<[Arg; 2]>;

/// One argument record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arg {
    /// Value used as-is.
    Literal(u8),
    /// Register whose current content is substituted at run time.
    Register(u8),
}

impl Arg {
    /// Interprets a `(tag, value)` record.
    pub const fn from_record(tag: u8, value: u8) -> Self {
        if tag == LITERAL_TAG {
            Self::Literal(value)
        } else {
            Self::Register(value)
        }
    }

    /// Encodes back to a `(tag, value)` record.
    pub const fn to_record(self) -> [u8; 2] {
        match self {
            Self::Literal(v) => [LITERAL_TAG, v],
            Self::Register(r) => [REGISTER_TAG, r],
        }
    }

    /// The value byte, whatever the tag.
    pub const fn raw(self) -> u8 {
        match self {
            Self::Literal(v) | Self::Register(v) => v,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "{v}"),
            Self::Register(r) => write!(f, "r{r}"),
        }
    }
}

/// A decoded instruction. Each variant carries exactly `arity` operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `register[reg] += delta`
    Inc {
        /// Register to update.
        reg: Arg,
        /// Amount added.
        delta: Arg,
    },
    /// `register[reg] -= delta`
    Dec {
        /// Register to update.
        reg: Arg,
        /// Amount subtracted.
        delta: Arg,
    },
    /// Print an integer in decimal.
    PrintA(Arg),
    /// Print the character with this code point.
    PrintB(Arg),
    /// Continue at an absolute instruction index.
    Goto(Arg),
    /// Skip the following instruction when both operands are equal.
    Test(Arg, Arg),
}

impl Instruction {
    /// Opcode of this instruction.
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::Inc { .. } => Opcode::Inc,
            Self::Dec { .. } => Opcode::Dec,
            Self::PrintA(_) => Opcode::PrintA,
            Self::PrintB(_) => Opcode::PrintB,
            Self::Goto(_) => Opcode::Goto,
            Self::Test(..) => Opcode::Test,
        }
    }

    /// Operands in encoding order.
    pub fn operands(&self) -> Operands {
        match *self {
            Self::Inc { reg, delta } | Self::Dec { reg, delta } => smallvec![reg, delta],
            Self::PrintA(a) | Self::PrintB(a) | Self::Goto(a) => smallvec![a],
            Self::Test(a, b) => smallvec![a, b],
        }
    }

    /// Builds an instruction from an opcode and its operands.
    ///
    /// Returns `None` when `args.len()` differs from the opcode arity.
    pub fn from_parts(opcode: Opcode, args: &[Arg]) -> Option<Self> {
        let instr = match (opcode, args) {
            (Opcode::Inc, &[reg, delta]) => Self::Inc { reg, delta },
            (Opcode::Dec, &[reg, delta]) => Self::Dec { reg, delta },
            (Opcode::PrintA, &[a]) => Self::PrintA(a),
            (Opcode::PrintB, &[a]) => Self::PrintB(a),
            (Opcode::Goto, &[a]) => Self::Goto(a),
            (Opcode::Test, &[a, b]) => Self::Test(a, b),
            _ => return None,
        };
        Some(instr)
    }

    /// Appends the encoded form (opcode byte then argument records).
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.opcode().byte());
        for arg in self.operands() {
            out.extend_from_slice(&arg.to_record());
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode())?;
        for (i, arg) in self.operands().iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{arg}")?;
        }
        Ok(())
    }
}
