use crate::{
    isa::{Descriptor, Field, UNUSED},
    operand::Operand,
};
use std::fmt;

/// One 4-byte machine word, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    pub opcode: u8,
    pub src1: u8,
    pub src2: u8,
    pub dest: u8,
}

impl Word {
    pub fn bytes(self) -> [u8; 4] {
        [self.opcode, self.src1, self.src2, self.dest]
    }
}

impl From<[u8; 4]> for Word {
    fn from([opcode, src1, src2, dest]: [u8; 4]) -> Self {
        Self { opcode, src1, src2, dest }
    }
}

impl fmt::Display for Word {
    /// `{}` renders hex quads, `{:#}` binary quads.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.bytes();
        if f.alternate() {
            write!(f, "{a:#010b} {b:#010b} {c:#010b} {d:#010b}")
        } else {
            write!(f, "{a:#04x} {b:#04x} {c:#04x} {d:#04x}")
        }
    }
}

/// Places already-classified operands into their fields. Operands pair with
/// `desc.slots()` by position; missing fields stay [`UNUSED`].
pub fn encode(desc: &Descriptor, operands: &[Operand]) -> Word {
    let mut word = Word {
        opcode: desc.opcode,
        src1: UNUSED,
        src2: UNUSED,
        dest: UNUSED,
    };
    for (slot, op) in desc.slots().iter().zip(operands) {
        let byte = match slot.field {
            Field::Src1 => &mut word.src1,
            Field::Src2 => &mut word.src2,
            Field::Dest => &mut word.dest,
        };
        *byte = op.value();
        if op.is_immediate() {
            word.opcode |= slot.field.imm_flag();
        }
    }
    word
}
