use std::collections::HashMap;

use tubby_core::Word;

/// Sparse register file. Unset registers read as zero.
///
/// Identifiers are full words: operands decoded from bytes name registers
/// `0..=255`, but INC/DEC with a register-reference first operand resolve the
/// target through another register and may address any word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: HashMap<Word, Word>,
}

impl RegisterFile {
    /// Empty register file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `id` (zero when never written).
    pub fn get(&self, id: Word) -> Word {
        self.regs.get(&id).copied().unwrap_or(0)
    }

    /// Overwrites `id`.
    pub fn set(&mut self, id: Word, value: Word) {
        self.regs.insert(id, value);
    }

    /// `id += delta`, wrapping on overflow.
    pub fn add(&mut self, id: Word, delta: Word) {
        let slot = self.regs.entry(id).or_insert(0);
        *slot = slot.wrapping_add(delta);
    }

    /// `id -= delta`, wrapping on overflow.
    pub fn sub(&mut self, id: Word, delta: Word) {
        let slot = self.regs.entry(id).or_insert(0);
        *slot = slot.wrapping_sub(delta);
    }

    /// Number of registers written at least once.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// True if no register was ever written.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }
}
