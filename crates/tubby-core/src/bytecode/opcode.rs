use core::fmt;

/// The six operations understood by the machine.
///
/// Discriminants are the encoded opcode bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// `INC reg, delta`
    Inc = 0x10,
    /// `DEC reg, delta`
    Dec = 0x11,
    /// `PRINTA value`: decimal integer.
    PrintA = 0x12,
    /// `PRINTB value`: single character.
    PrintB = 0x13,
    /// `GOTO target`
    Goto = 0x14,
    /// `TEST a, b`: skip next instruction when equal.
    Test = 0x15,
}

impl Opcode {
    /// Every opcode, in byte order.
    pub const ALL: [Self; 6] =
        [Self::Inc, Self::Dec, Self::PrintA, Self::PrintB, Self::Goto, Self::Test];

    /// Encoded byte value.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Looks a byte up in the opcode table.
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x10 => Some(Self::Inc),
            0x11 => Some(Self::Dec),
            0x12 => Some(Self::PrintA),
            0x13 => Some(Self::PrintB),
            0x14 => Some(Self::Goto),
            0x15 => Some(Self::Test),
            _ => None,
        }
    }

    /// Number of argument records following the opcode byte.
    pub const fn arity(self) -> usize {
        match self {
            Self::Inc | Self::Dec | Self::Test => 2,
            Self::PrintA | Self::PrintB | Self::Goto => 1,
        }
    }

    /// Total encoded size of one instruction with this opcode.
    pub const fn encoded_len(self) -> usize {
        1 + 2 * self.arity()
    }

    /// Upper-case mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Inc => "INC",
            Self::Dec => "DEC",
            Self::PrintA => "PRINTA",
            Self::PrintB => "PRINTB",
            Self::Goto => "GOTO",
            Self::Test => "TEST",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
