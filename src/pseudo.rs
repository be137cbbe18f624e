//! Lowering of composite ops into primitive words.

use crate::{
    encoder::{self, Word},
    error::AsmError,
    isa::{ADD, Descriptor, MOV, Op, PA, POP, PUSH, Pseudo, SUB, WORD_SIZE},
    operand::Operand,
};

impl Op {
    /// Number of machine words the op occupies. Sizing and lowering share this.
    pub fn word_count(&self) -> u16 {
        match self {
            Op::Pseudo(Pseudo::Call) => 2,
            _ => 1,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u16 {
        self.word_count() * WORD_SIZE
    }
}

fn word(desc: Descriptor, operands: &[Operand]) -> Word {
    encoder::encode(&desc, operands)
}

/// Target address taken as a literal source for `mov pa, <target>`.
fn jump_to(target: Operand) -> Word {
    word(MOV, &[Operand::Register(PA), Operand::Immediate(target.value())])
}

/// Expands `pseudo` at byte `address` into its primitive words.
pub fn lower(pseudo: Pseudo, operands: &[Operand], address: u16) -> Result<Vec<Word>, AsmError> {
    let words = match (pseudo, operands) {
        (Pseudo::Jmp, &[target]) => vec![jump_to(target)],
        (Pseudo::Inc, &[r]) => vec![word(ADD, &[r, r, Operand::Immediate(1)])],
        (Pseudo::Dec, &[r]) => vec![word(SUB, &[r, r, Operand::Immediate(1)])],
        (Pseudo::Ret, &[]) => vec![word(POP, &[Operand::Register(PA)])],
        (Pseudo::Call, &[target]) => {
            let size = Op::Pseudo(Pseudo::Call).size();
            let ret = address.checked_add(size).ok_or(AsmError::Overflow)?;
            let ret = u8::try_from(ret).map_err(|_| AsmError::AddressRange {
                name: "return address".into(),
                address: ret,
            })?;
            vec![word(PUSH, &[Operand::Immediate(ret)]), jump_to(target)]
        }
        (_, ops) => {
            return Err(AsmError::OperandCount {
                expected: pseudo.slots().len(),
                got: ops.len(),
            });
        }
    };
    debug_assert_eq!(words.len(), Op::Pseudo(pseudo).word_count() as usize);
    Ok(words)
}
