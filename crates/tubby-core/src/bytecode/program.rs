//! Program container plus the flat byte decoder/encoder.

use core::{ops::Index, slice};

use tracing::debug;

use crate::{
    bytecode::{
        instr::{Arg, Instruction},
        opcode::Opcode,
    },
    DecodeError, DecodeResult,
};

/// Ordered, 0-indexed instruction sequence. Never mutated once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instrs: Vec<Instruction>,
}

impl Program {
    /// Wraps already-typed instructions.
    pub fn new(instrs: Vec<Instruction>) -> Self {
        Self { instrs }
    }

    /// Decodes the flat byte format.
    ///
    /// Fails on the first unknown opcode or incomplete argument record; no
    /// partial program is returned.
    pub fn from_bytes(data: &[u8]) -> DecodeResult<Self> {
        let mut reader = Reader::new(data);
        let mut instrs = Vec::new();

        while let Some((offset, byte)) = reader.read_u8() {
            let opcode = Opcode::from_byte(byte).ok_or(DecodeError::UnknownOpcode { byte, offset })?;
            let needed = 2 * opcode.arity();
            let records = reader.read_exact(needed).ok_or(DecodeError::Truncated {
                opcode,
                offset,
                needed,
                remaining: reader.remaining(),
            })?;
            instrs.push(decode_records(opcode, records));
        }

        debug!(bytes = data.len(), instructions = instrs.len(), "program decoded");
        Ok(Self { instrs })
    }

    /// Encodes back to the flat byte format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.instrs.iter().map(|i| i.opcode().encoded_len()).sum());
        for instr in &self.instrs {
            instr.encode_into(&mut out);
        }
        out
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    /// Whether the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    /// Instruction at `pc`, if in bounds.
    pub fn get(&self, pc: usize) -> Option<Instruction> {
        self.instrs.get(pc).copied()
    }

    /// Iterates in program order.
    pub fn iter(&self) -> slice::Iter<'_, Instruction> {
        self.instrs.iter()
    }

    /// Borrowed view of all instructions.
    pub fn as_slice(&self) -> &[Instruction] {
        &self.instrs
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instrs: Vec<Instruction>) -> Self {
        Self::new(instrs)
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, pc: usize) -> &Instruction {
        &self.instrs[pc]
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds the typed instruction from `2 * arity` record bytes.
fn decode_records(opcode: Opcode, records: &[u8]) -> Instruction {
    debug_assert_eq!(records.len(), 2 * opcode.arity());
    let arg = |i: usize| Arg::from_record(records[2 * i], records[2 * i + 1]);
    match opcode {
        Opcode::Inc => Instruction::Inc { reg: arg(0), delta: arg(1) },
        Opcode::Dec => Instruction::Dec { reg: arg(0), delta: arg(1) },
        Opcode::PrintA => Instruction::PrintA(arg(0)),
        Opcode::PrintB => Instruction::PrintB(arg(0)),
        Opcode::Goto => Instruction::Goto(arg(0)),
        Opcode::Test => Instruction::Test(arg(0), arg(1)),
    }
}

/* ─────────────────────────── Byte reader ─────────────────────────── */

/// Sequential reader over the input slice.
struct Reader<'a> {
    data: &'a [u8],
    off: usize,
}

impl<'a> Reader<'a> {
    const fn new(data: &'a [u8]) -> Self {
        Self { data, off: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.off)
    }

    /// Next byte with its offset, `None` at end of input.
    fn read_u8(&mut self) -> Option<(usize, u8)> {
        let at = self.off;
        let b = *self.data.get(at)?;
        self.off += 1;
        Some((at, b))
    }

    /// Exactly `n` bytes, or `None` (offset unchanged) if fewer remain.
    fn read_exact(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.off.checked_add(n)?;
        let slice = self.data.get(self.off..end)?;
        self.off = end;
        Some(slice)
    }
}

/* ─────────────────────────── Tests ─────────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LITERAL_TAG, REGISTER_TAG};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const L: u8 = LITERAL_TAG;
    const R: u8 = REGISTER_TAG;

    #[test]
    fn empty_input_is_empty_program() -> DecodeResult<()> {
        let p = Program::from_bytes(&[])?;
        assert!(p.is_empty());
        Ok(())
    }

    #[test]
    fn decodes_in_input_order() -> DecodeResult<()> {
        // INC 0, 5 ; PRINTA r0
        let bytes = [0x10, L, 0, L, 5, 0x12, R, 0];
        let p = Program::from_bytes(&bytes)?;
        assert_eq!(
            p.as_slice(),
            &[
                Instruction::Inc { reg: Arg::Literal(0), delta: Arg::Literal(5) },
                Instruction::PrintA(Arg::Register(0)),
            ]
        );
        Ok(())
    }

    #[test]
    fn each_opcode_consumes_exactly_its_records() -> DecodeResult<()> {
        for op in Opcode::ALL {
            let mut bytes = vec![op.byte()];
            for i in 0..op.arity() {
                bytes.extend_from_slice(&[L, i as u8]);
            }
            assert_eq!(bytes.len(), op.encoded_len());
            // A trailing GOTO proves nothing was over- or under-read.
            bytes.extend_from_slice(&[0x14, L, 9]);

            let p = Program::from_bytes(&bytes)?;
            assert_eq!(p.len(), 2, "{op}");
            assert_eq!(p[0].opcode(), op);
            assert_eq!(p[0].operands().len(), op.arity());
            assert_eq!(p[1], Instruction::Goto(Arg::Literal(9)));
        }
        Ok(())
    }

    #[test]
    fn unknown_opcode_reports_offset() {
        assert_eq!(
            Program::from_bytes(&[0xFF]),
            Err(DecodeError::UnknownOpcode { byte: 0xFF, offset: 0 })
        );
        // second instruction starts at offset 3
        assert_eq!(
            Program::from_bytes(&[0x14, L, 0, 0x00]),
            Err(DecodeError::UnknownOpcode { byte: 0x00, offset: 3 })
        );
    }

    #[test]
    fn missing_record_is_truncated() {
        assert_eq!(
            Program::from_bytes(&[0x12, L, 1, 0x15, L, 3]),
            Err(DecodeError::Truncated { opcode: Opcode::Test, offset: 3, needed: 4, remaining: 2 })
        );
        assert_eq!(
            Program::from_bytes(&[0x13]),
            Err(DecodeError::Truncated { opcode: Opcode::PrintB, offset: 0, needed: 2, remaining: 0 })
        );
    }

    #[test]
    fn dangling_tag_byte_is_truncated() {
        assert_eq!(
            Program::from_bytes(&[0x14, L]),
            Err(DecodeError::Truncated { opcode: Opcode::Goto, offset: 0, needed: 2, remaining: 1 })
        );
    }

    #[test]
    fn encoder_output_decodes_to_same_program() -> DecodeResult<()> {
        let p: Program = [
            Instruction::Test(Arg::Literal(3), Arg::Literal(3)),
            Instruction::PrintA(Arg::Literal(99)),
            Instruction::Dec { reg: Arg::Register(1), delta: Arg::Literal(255) },
            Instruction::PrintB(Arg::Register(4)),
        ]
        .into_iter()
        .collect();
        let bytes = p.to_bytes();
        assert_eq!(bytes.len(), 5 + 3 + 5 + 3);
        assert_eq!(Program::from_bytes(&bytes)?, p);
        Ok(())
    }

    proptest! {
        #[test]
        fn tag_decides_argument_kind(tag in any::<u8>(), value in any::<u8>()) {
            let p = Program::from_bytes(&[0x12, tag, value]).unwrap();
            let expected = if tag == L { Arg::Literal(value) } else { Arg::Register(value) };
            prop_assert_eq!(p[0], Instruction::PrintA(expected));
        }

        #[test]
        fn decoder_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            match Program::from_bytes(&bytes) {
                Ok(p) => {
                    let consumed: usize = p.iter().map(|i| i.opcode().encoded_len()).sum();
                    prop_assert_eq!(consumed, bytes.len());
                }
                Err(e) => prop_assert!(e.offset() < bytes.len()),
            }
        }
    }
}
