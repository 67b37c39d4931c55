//! Per-device instruction table.

use crate::error::SequenceError;
use crate::instruction::{Instruction, Op};
use crate::target::InstructionTarget;
use crate::types::MAX_LINES;

/// Ordered, bounded program for one device
///
/// Only entries in `[0, len)` are meaningful. `clear` resets the length
/// without erasing storage; stale entries are overwritten by later appends.
#[derive(Debug, Clone)]
pub struct Setlist {
    entries: [Instruction; MAX_LINES],
    len: usize,
}

impl Default for Setlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Setlist {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: [Instruction::default(); MAX_LINES],
            len: 0,
        }
    }

    /// Number of programmed lines
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stored entry at `index`, if programmed
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        if index < self.len {
            Some(&self.entries[index])
        } else {
            None
        }
    }

    /// Append the next line of the program
    ///
    /// If the new instruction equals the previous entry as stored, a hold
    /// carrying the same params goes in instead, so a step that would not
    /// change the device's output costs it nothing at run time. Because the
    /// comparison is against the stored entry, a run of identical lines
    /// alternates real and hold entries.
    pub fn append(&mut self, instruction: Instruction) -> Result<(), SequenceError> {
        if self.len >= MAX_LINES {
            return Err(SequenceError::TableFull);
        }

        let stored = if self.len > 0 && self.entries[self.len - 1] == instruction {
            Instruction::hold(instruction.params)
        } else {
            instruction
        };

        self.entries[self.len] = stored;
        self.len += 1;
        Ok(())
    }

    /// Execute the line at `index` against `target`
    ///
    /// An index at or past the end invokes nothing and reports
    /// `LineOutOfRange`.
    pub fn execute_at(
        &self,
        index: usize,
        target: &mut dyn InstructionTarget,
    ) -> Result<(), SequenceError> {
        let entry = self.get(index).ok_or(SequenceError::LineOutOfRange)?;
        match entry.op {
            Op::Apply(opcode) => target.apply(opcode, &entry.params),
            Op::Hold => target.hold(),
        }
        Ok(())
    }

    /// Forget the program
    ///
    /// Storage is left in place; the next append starts from index 0 with no
    /// duplicate comparison against pre-clear data.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Opcode, ParamList, MAX_PARAMS};

    /// Records every target invocation
    #[derive(Debug, Default)]
    struct Recorder {
        applies: heapless::Vec<(Opcode, ParamList), 8>,
        holds: usize,
    }

    impl InstructionTarget for Recorder {
        fn apply(&mut self, opcode: Opcode, params: &ParamList) {
            let _ = self.applies.push((opcode, *params));
        }

        fn hold(&mut self) {
            self.holds += 1;
        }
    }

    fn make_params(values: &[i32]) -> ParamList {
        let mut params = [0; MAX_PARAMS];
        params[..values.len()].copy_from_slice(values);
        params
    }

    #[test]
    fn test_append_and_get() {
        let mut list = Setlist::new();
        let instr = Instruction::apply(1, make_params(&[100, 200]));
        list.append(instr).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0), Some(&instr));
        assert_eq!(list.get(1), None);
    }

    #[test]
    fn test_duplicate_append_stores_hold() {
        let mut list = Setlist::new();
        let instr = Instruction::apply(1, make_params(&[42]));
        list.append(instr).unwrap();
        list.append(instr).unwrap();

        assert_eq!(list.get(0).unwrap().op, Op::Apply(1));
        let second = list.get(1).unwrap();
        assert!(second.is_hold());
        // The hold keeps the elided params for diagnostics
        assert_eq!(second.params, instr.params);
    }

    #[test]
    fn test_identical_run_alternates_real_and_hold() {
        let mut list = Setlist::new();
        let instr = Instruction::apply(2, make_params(&[7]));
        for _ in 0..4 {
            list.append(instr).unwrap();
        }

        assert_eq!(list.get(0).unwrap().op, Op::Apply(2));
        assert!(list.get(1).unwrap().is_hold());
        assert_eq!(list.get(2).unwrap().op, Op::Apply(2));
        assert!(list.get(3).unwrap().is_hold());
    }

    #[test]
    fn test_different_instruction_after_duplicates_is_real() {
        let mut list = Setlist::new();
        let first = Instruction::apply(1, make_params(&[5]));
        let other = Instruction::apply(1, make_params(&[6]));
        list.append(first).unwrap();
        list.append(first).unwrap();
        list.append(other).unwrap();

        assert_eq!(list.get(2), Some(&other));
    }

    #[test]
    fn test_execute_at_dispatches() {
        let mut list = Setlist::new();
        let instr = Instruction::apply(3, make_params(&[1, 2, 3]));
        list.append(instr).unwrap();
        list.append(instr).unwrap();

        let mut target = Recorder::default();
        list.execute_at(0, &mut target).unwrap();
        list.execute_at(1, &mut target).unwrap();

        assert_eq!(target.applies.len(), 1);
        assert_eq!(target.applies[0], (3, instr.params));
        assert_eq!(target.holds, 1);
    }

    #[test]
    fn test_execute_past_end_invokes_nothing() {
        let mut list = Setlist::new();
        list.append(Instruction::apply(0, make_params(&[]))).unwrap();

        let mut target = Recorder::default();
        let result = list.execute_at(1, &mut target);

        assert_eq!(result, Err(SequenceError::LineOutOfRange));
        assert!(target.applies.is_empty());
        assert_eq!(target.holds, 0);
    }

    #[test]
    fn test_clear_then_append_skips_stale_dedup() {
        let mut list = Setlist::new();
        let instr = Instruction::apply(1, make_params(&[9]));
        list.append(instr).unwrap();
        list.clear();
        assert_eq!(list.len(), 0);

        // Index 0 after a clear is never compared against pre-clear data
        list.append(instr).unwrap();
        assert_eq!(list.get(0).unwrap().op, Op::Apply(1));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut list = Setlist::new();
        list.append(Instruction::apply(0, make_params(&[1]))).unwrap();
        list.clear();
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_append_past_capacity() {
        let mut list = Setlist::new();
        for i in 0..MAX_LINES {
            list.append(Instruction::apply(0, make_params(&[i as i32])))
                .unwrap();
        }

        let overflow = list.append(Instruction::apply(0, make_params(&[-1])));
        assert_eq!(overflow, Err(SequenceError::TableFull));
        assert_eq!(list.len(), MAX_LINES);
    }
}
