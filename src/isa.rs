//! Instruction-set tables: register names, primitive descriptors and pseudo-ops.
//!
//! Every word is `opcode, src1, src2, dest`. The two high opcode bits flag that
//! src1 / src2 hold a literal instead of a register index.

use bitflags::bitflags;
use std::collections::HashMap;

pub const IMM1: u8 = 0b1000_0000;
pub const IMM2: u8 = 0b0100_0000;
/// Filler for an unused operand byte, read as zero by the machine.
pub const UNUSED: u8 = 0b1111_1111;
pub const WORD_SIZE: u16 = 4;

/// Program-address register index.
pub const PA: u8 = 6;

bitflags! {
    /// Addressing modes an operand slot accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Mode: u8 {
        const REGISTER  = 1 << 0;
        const IMMEDIATE = 1 << 1;
        const LABEL     = 1 << 2;
    }
}

/// Physical operand byte a slot lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Src1,
    Src2,
    Dest,
}

impl Field {
    /// Opcode bit set when this field carries an immediate.
    pub fn imm_flag(self) -> u8 {
        match self {
            Field::Src1 => IMM1,
            Field::Src2 => IMM2,
            Field::Dest => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub modes: Mode,
    pub field: Field,
}

const fn slot(modes: Mode, field: Field) -> Slot {
    Slot { modes, field }
}

const R: Mode = Mode::REGISTER;
const RI: Mode = Mode::REGISTER.union(Mode::IMMEDIATE);
const LI: Mode = Mode::LABEL.union(Mode::IMMEDIATE);
const L: Mode = Mode::LABEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `op rd, a, b`
    Three,
    /// `op target, a, b`
    Jump,
    /// `op rd, a`
    Two,
    /// `op a`
    Source,
    /// `op rd`
    Dest,
}

// slot tables, source order
const THREE: &[Slot] = &[
    slot(R, Field::Dest),
    slot(RI, Field::Src1),
    slot(RI, Field::Src2),
];
const JUMP: &[Slot] = &[
    slot(LI, Field::Dest),
    slot(RI, Field::Src1),
    slot(RI, Field::Src2),
];
const TWO: &[Slot] = &[slot(R, Field::Dest), slot(RI, Field::Src1)];
const SOURCE: &[Slot] = &[slot(RI, Field::Src1)];
const DEST: &[Slot] = &[slot(R, Field::Dest)];
// Pseudo operands never reach the encoder directly, so the field is nominal.
const TARGET: &[Slot] = &[slot(L, Field::Src1)];

impl Shape {
    pub fn slots(self) -> &'static [Slot] {
        match self {
            Shape::Three => THREE,
            Shape::Jump => JUMP,
            Shape::Two => TWO,
            Shape::Source => SOURCE,
            Shape::Dest => DEST,
        }
    }
}

/// A primitive instruction with a direct encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub opcode: u8,
    pub shape: Shape,
}

impl Descriptor {
    pub fn slots(&self) -> &'static [Slot] {
        self.shape.slots()
    }
}

/// Composite ops lowered into primitives before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pseudo {
    Call,
    Ret,
    Jmp,
    Inc,
    Dec,
}

impl Pseudo {
    pub fn slots(self) -> &'static [Slot] {
        match self {
            Pseudo::Call | Pseudo::Jmp => TARGET,
            Pseudo::Inc | Pseudo::Dec => DEST,
            Pseudo::Ret => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Primitive(Descriptor),
    Pseudo(Pseudo),
}

impl Op {
    pub fn slots(&self) -> &'static [Slot] {
        match self {
            Op::Primitive(desc) => desc.slots(),
            Op::Pseudo(p) => p.slots(),
        }
    }
}

// primitive opcodes
pub const ADD: Descriptor = Descriptor { opcode: 0x00, shape: Shape::Three };
pub const SUB: Descriptor = Descriptor { opcode: 0x01, shape: Shape::Three };
pub const PUSH: Descriptor = Descriptor { opcode: 0x06, shape: Shape::Source };
pub const POP: Descriptor = Descriptor { opcode: 0x07, shape: Shape::Dest };
pub const MOV: Descriptor = Descriptor { opcode: 0x08, shape: Shape::Two };

/// Immutable mnemonic and register tables. Build once, share by reference.
#[derive(Debug, Clone)]
pub struct Isa {
    ops: HashMap<&'static str, Op>,
    registers: HashMap<&'static str, u8>,
}

impl Isa {
    pub fn new() -> Self {
        use Op::{Primitive as P, Pseudo as Ps};
        let three = |opcode| P(Descriptor { opcode, shape: Shape::Three });
        let jump = |opcode| P(Descriptor { opcode, shape: Shape::Jump });
        let two = |opcode| P(Descriptor { opcode, shape: Shape::Two });

        let ops = HashMap::from([
            ("add", P(ADD)),
            ("sub", P(SUB)),
            ("and", three(0x02)),
            ("or", three(0x03)),
            ("not", two(0x04)),
            ("xor", three(0x05)),
            ("push", P(PUSH)),
            ("pop", P(POP)),
            ("mov", P(MOV)),
            ("mull", three(0x09)),
            ("mulu", three(0x0A)),
            ("shl", three(0x0B)),
            ("shr", three(0x0C)),
            ("jmpe", jump(0x20)),
            ("jmpne", jump(0x21)),
            ("jmplt", jump(0x22)),
            ("jmplte", jump(0x23)),
            ("jmpgt", jump(0x24)),
            ("jmpgte", jump(0x25)),
            ("call", Ps(Pseudo::Call)),
            ("ret", Ps(Pseudo::Ret)),
            ("jmp", Ps(Pseudo::Jmp)),
            ("inc", Ps(Pseudo::Inc)),
            ("dec", Ps(Pseudo::Dec)),
        ]);

        let registers = HashMap::from([
            ("r0", 0),
            ("r1", 1),
            ("r2", 2),
            ("r3", 3),
            ("r4", 4),
            ("ra", 5), // ram address
            ("pa", PA),
            ("in", 7), // in/out share one port
            ("out", 7),
            ("r5", 8),
            ("r6", 9),
            ("r7", 10),
            ("r8", 11),
            ("r9", 12),
            ("r10", 13),
            ("r11", 14),
            ("r12", 15),
            ("rm", 16), // ram
        ]);

        Self { ops, registers }
    }

    pub fn lookup(&self, mnemonic: &str) -> Option<&Op> {
        self.ops.get(mnemonic)
    }

    pub fn register(&self, name: &str) -> Option<u8> {
        self.registers.get(name).copied()
    }
}

impl Default for Isa {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_and_out_alias_one_port() {
        let isa = Isa::new();
        assert_eq!(isa.register("in"), Some(7));
        assert_eq!(isa.register("out"), Some(7));
        assert_eq!(isa.register("rm"), Some(16));
        assert_eq!(isa.register("r13"), None);
    }

    #[test]
    fn jump_target_takes_labels_but_never_flags() {
        let isa = Isa::new();
        let Some(Op::Primitive(desc)) = isa.lookup("jmplte") else {
            panic!("jmplte should be primitive");
        };
        assert_eq!(desc.opcode, 0x23);
        let target = desc.slots()[0];
        assert!(target.modes.contains(Mode::LABEL));
        assert_eq!(target.field.imm_flag(), 0);
    }

    #[test]
    fn slot_tables_match_arity() {
        assert_eq!(Shape::Three.slots().len(), 3);
        assert_eq!(Shape::Jump.slots().len(), 3);
        assert_eq!(Shape::Two.slots().len(), 2);
        assert_eq!(Shape::Source.slots()[0].field, Field::Src1);
        assert_eq!(Shape::Dest.slots()[0].field, Field::Dest);
        assert_eq!(Pseudo::Call.slots()[0].modes, Mode::LABEL);
        assert_eq!(Pseudo::Inc.slots()[0].modes, Mode::REGISTER);
        assert!(Pseudo::Ret.slots().is_empty());
    }

    #[test]
    fn pseudo_ops_are_not_primitive() {
        let isa = Isa::new();
        for name in ["call", "ret", "jmp", "inc", "dec"] {
            assert!(matches!(isa.lookup(name), Some(Op::Pseudo(_))), "{name}");
        }
        assert_eq!(isa.lookup("halt"), None);
    }
}
