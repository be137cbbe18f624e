//! tasm – two-pass assembler for a 4-byte-word register machine

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod isa;
pub mod lexer;
pub mod listing;
pub mod operand;
pub mod parser;
pub mod pseudo;
pub mod symbols;

pub use assembler::Assembler;
pub use encoder::Word;
pub use error::{AsmError, LineError};
pub use isa::Isa;
pub use listing::{Entry, Listing, Radix, Rendered};
pub use parser::Program;
