//! Instruction target contract.
//!
//! The sequencer drives heterogeneous output hardware through this one
//! trait; device semantics (what an opcode means, what the params are) stay
//! entirely inside the implementation.

use crate::types::{Opcode, ParamList};

/// A device the sequencer can step through a program
///
/// Called synchronously from the foreground (manual execute) or the trigger
/// context (run execute). Implementations must not block: a slow `apply`
/// delays every device on the shared trigger.
pub trait InstructionTarget {
    /// Perform the action named by `opcode` with its parameter block
    fn apply(&mut self, opcode: Opcode, params: &ParamList);

    /// The step is a hold: the previous output stays valid
    ///
    /// Defaults to doing nothing. Devices with a cheaper "no change" path
    /// than re-issuing the last command can override it.
    fn hold(&mut self) {}
}
