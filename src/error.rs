use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AsmError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("instruction undefined: {0}")]
    UnknownInstruction(String),

    #[error("instruction parameter count mismatch: expected {expected}, got {got}")]
    OperandCount { expected: usize, got: usize },

    #[error("instruction parameter type not allowed: {0}")]
    ModeNotAllowed(String),

    #[error("unable to parse parameter `{token}`: {source}")]
    BadImmediate {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("register undefined: `{0}`")]
    UnknownRegister(String),

    #[error("label undefined: `{0}`")]
    UnknownLabel(String),

    #[error("duplicate label: `{0}`")]
    DuplicateLabel(String),

    #[error("address {address:#x} of `{name}` does not fit in one byte")]
    AddressRange { name: String, address: u16 },

    #[error("address/size overflow")]
    Overflow,

    #[error("pass size mismatch: sized {sized} bytes, emitted {emitted} bytes")]
    SizeMismatch { sized: u16, emitted: u16 },
}

/// An [`AsmError`] tagged with the 0-based source line it was raised on.
#[derive(Debug, Error, PartialEq)]
#[error("{line}: {kind}")]
pub struct LineError {
    pub line: usize,
    pub kind: AsmError,
}

impl AsmError {
    pub fn at(self, line: usize) -> LineError {
        LineError { line, kind: self }
    }
}
