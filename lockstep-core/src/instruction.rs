//! Instruction representation.

use crate::types::{Opcode, ParamList};

/// What a stored instruction does when its step comes up
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Op {
    /// Repeat of the previous step: the device keeps its output
    #[default]
    Hold,
    /// Invoke the target action named by the opcode
    Apply(Opcode),
}

/// One step of a device's program
///
/// Hold entries keep the params of the instruction they elide so the
/// diagnostic dump still shows what the step stands for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    pub op: Op,
    pub params: ParamList,
}

impl Instruction {
    /// An instruction invoking a target action
    pub fn apply(opcode: Opcode, params: ParamList) -> Self {
        Self {
            op: Op::Apply(opcode),
            params,
        }
    }

    /// A hold carrying the elided instruction's params
    pub fn hold(params: ParamList) -> Self {
        Self {
            op: Op::Hold,
            params,
        }
    }

    /// Whether this step is a hold
    pub fn is_hold(&self) -> bool {
        matches!(self.op, Op::Hold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_PARAMS;

    #[test]
    fn test_equality_covers_op_and_params() {
        let a = Instruction::apply(1, [5, 0, 0, 0, 0, 0, 0, 0]);
        let b = Instruction::apply(1, [5, 0, 0, 0, 0, 0, 0, 0]);
        let c = Instruction::apply(2, [5, 0, 0, 0, 0, 0, 0, 0]);
        let d = Instruction::apply(1, [6, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_hold_never_equals_apply() {
        let params = [3; MAX_PARAMS];
        assert_ne!(Instruction::hold(params), Instruction::apply(0, params));
    }
}
