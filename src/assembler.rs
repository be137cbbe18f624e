//! Two-pass driver.
//!
//! Pass 1 sizes every line and binds labels; pass 2 classifies operands,
//! lowers pseudo-ops and encodes words. Each run owns its symbol table and
//! address counter, so one [`Isa`] can serve any number of assemblies.

use crate::{
    encoder::{self, Word},
    error::{AsmError, LineError},
    isa::{Isa, Op, WORD_SIZE},
    listing::{Entry, Listing},
    operand::{self, Operand},
    parser::{Item, Program, SourceLine},
    pseudo,
    symbols::SymbolTable,
};
use tracing::{debug, trace};

fn lookup<'i>(isa: &'i Isa, mnemonic: &str) -> Result<&'i Op, AsmError> {
    isa.lookup(mnemonic)
        .ok_or_else(|| AsmError::UnknownInstruction(mnemonic.to_string()))
}

/// Binds every label to the byte address of the word after it.
pub fn first_pass(program: &Program, isa: &Isa) -> Result<SymbolTable, LineError> {
    let mut pc: u16 = 0;
    let mut symbols = SymbolTable::new();

    for line in &program.lines {
        match &line.item {
            Item::Blank => {}
            Item::Label(name) => {
                symbols.define(name, pc).map_err(|e| e.at(line.number))?;
                trace!(label = %name, address = pc, "label bound");
            }
            Item::Inst { mnemonic, .. } => {
                let op = lookup(isa, mnemonic).map_err(|e| e.at(line.number))?;
                pc = pc
                    .checked_add(op.size())
                    .ok_or_else(|| AsmError::Overflow.at(line.number))?;
            }
        }
    }

    symbols.length = pc;
    debug!(labels = symbols.len(), length = pc, "pass 1 done");
    Ok(symbols)
}

fn encode_line(
    line: &SourceLine,
    mnemonic: &str,
    tokens: &[String],
    pc: u16,
    isa: &Isa,
    symbols: &SymbolTable,
) -> Result<Vec<Word>, AsmError> {
    let op = lookup(isa, mnemonic)?;
    let slots = op.slots();
    if slots.len() != tokens.len() {
        return Err(AsmError::OperandCount {
            expected: slots.len(),
            got: tokens.len(),
        });
    }

    let operands = slots
        .iter()
        .zip(tokens)
        .map(|(slot, tok)| operand::classify(tok, slot.modes, isa, symbols))
        .collect::<Result<Vec<Operand>, _>>()?;

    let words = match op {
        Op::Primitive(desc) => vec![encoder::encode(desc, &operands)],
        Op::Pseudo(p) => pseudo::lower(*p, &operands, pc)?,
    };
    trace!(line = line.number, address = pc, ?words, "encoded");
    Ok(words)
}

/// Encodes every instruction line against the table built by [`first_pass`].
pub fn second_pass(
    program: &Program,
    isa: &Isa,
    symbols: &SymbolTable,
) -> Result<Listing, LineError> {
    let mut pc: u16 = 0;
    let mut listing = Listing::default();

    for line in &program.lines {
        match &line.item {
            Item::Blank => {}
            Item::Label(_) => listing.entries.push(Entry::Label {
                line: line.number,
                text: line.text.clone(),
            }),
            Item::Inst { mnemonic, operands } => {
                let words = encode_line(line, mnemonic, operands, pc, isa, symbols)
                    .map_err(|e| e.at(line.number))?;
                let address = pc;
                for _ in &words {
                    pc = pc
                        .checked_add(WORD_SIZE)
                        .ok_or_else(|| AsmError::Overflow.at(line.number))?;
                }
                listing.entries.push(Entry::Instruction {
                    line: line.number,
                    address,
                    text: line.text.clone(),
                    words,
                });
            }
        }
    }

    if pc != symbols.length {
        let last = program.lines.last().map_or(0, |l| l.number);
        return Err(AsmError::SizeMismatch {
            sized: symbols.length,
            emitted: pc,
        }
        .at(last));
    }
    debug!(bytes = pc, "pass 2 done");
    Ok(listing)
}

/// Runs both passes with an injected instruction set.
#[derive(Debug, Clone, Copy)]
pub struct Assembler<'a> {
    isa: &'a Isa,
}

impl<'a> Assembler<'a> {
    pub fn new(isa: &'a Isa) -> Self {
        Self { isa }
    }

    pub fn assemble(&self, program: &Program) -> Result<Listing, LineError> {
        let symbols = first_pass(program, self.isa)?;
        second_pass(program, self.isa, &symbols)
    }

    /// Parses and assembles source text.
    pub fn assemble_str(&self, src: &str) -> Result<Listing, LineError> {
        let program = Program::parse(src)?;
        self.assemble(&program)
    }
}
