use crate::{
    error::AsmError,
    isa::{Isa, Mode},
    symbols::SymbolTable,
};

/// A token resolved against a slot's allowed modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(u8),
    Immediate(u8),
    Address(u8),
}

impl Operand {
    pub fn value(self) -> u8 {
        match self {
            Operand::Register(v) | Operand::Immediate(v) | Operand::Address(v) => v,
        }
    }

    pub fn is_immediate(self) -> bool {
        matches!(self, Operand::Immediate(_))
    }
}

/// Parses an unsigned 8-bit literal: decimal, `0x` hex, `0o` / leading-`0` octal, `0b` binary.
pub fn parse_imm(tok: &str) -> Result<u8, AsmError> {
    let (digits, radix) = if let Some(h) = tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")) {
        (h, 16)
    } else if let Some(b) = tok.strip_prefix("0b").or_else(|| tok.strip_prefix("0B")) {
        (b, 2)
    } else if let Some(o) = tok.strip_prefix("0o").or_else(|| tok.strip_prefix("0O")) {
        (o, 8)
    } else if tok.len() > 1 && tok.starts_with('0') {
        (&tok[1..], 8)
    } else {
        (tok, 10)
    };
    // from_str_radix would accept a sign
    let digits = if digits.starts_with('+') { "" } else { digits };
    u8::from_str_radix(digits, radix).map_err(|source| AsmError::BadImmediate {
        token: tok.to_string(),
        source,
    })
}

fn starts_numeric(tok: &str) -> bool {
    tok.starts_with(|c: char| c.is_ascii_digit())
}

/// Resolves `tok` for a slot accepting `modes`.
///
/// Registers win over labels, labels over literals. An immediate that does not
/// fit in a byte is an error, never truncated.
pub fn classify(
    tok: &str,
    modes: Mode,
    isa: &Isa,
    sym: &SymbolTable,
) -> Result<Operand, AsmError> {
    let reg = isa.register(tok);
    if let Some(r) = reg {
        if modes.contains(Mode::REGISTER) {
            return Ok(Operand::Register(r));
        }
    }

    let label = sym.get(tok);
    if let Some(address) = label {
        if modes.contains(Mode::LABEL) {
            let a = u8::try_from(address).map_err(|_| AsmError::AddressRange {
                name: tok.to_string(),
                address,
            })?;
            return Ok(Operand::Address(a));
        }
    }

    if modes.contains(Mode::IMMEDIATE) {
        return match parse_imm(tok) {
            Ok(v) => Ok(Operand::Immediate(v)),
            Err(_) if reg.is_some() => Err(AsmError::ModeNotAllowed(tok.to_string())),
            Err(_) if modes.contains(Mode::LABEL) && !starts_numeric(tok) => {
                Err(AsmError::UnknownLabel(tok.to_string()))
            }
            Err(e) => Err(e),
        };
    }

    if reg.is_some() || label.is_some() || starts_numeric(tok) {
        Err(AsmError::ModeNotAllowed(tok.to_string()))
    } else if modes.contains(Mode::LABEL) {
        Err(AsmError::UnknownLabel(tok.to_string()))
    } else {
        Err(AsmError::UnknownRegister(tok.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RI: Mode = Mode::REGISTER.union(Mode::IMMEDIATE);
    const LI: Mode = Mode::LABEL.union(Mode::IMMEDIATE);

    fn fixture() -> (Isa, SymbolTable) {
        let mut sym = SymbolTable::new();
        sym.define("loop", 12).unwrap();
        sym.define("r1", 40).unwrap();
        sym.define("far", 0x104).unwrap();
        (Isa::new(), sym)
    }

    #[test]
    fn literal_bases() {
        assert_eq!(parse_imm("200"), Ok(200));
        assert_eq!(parse_imm("0xfF"), Ok(255));
        assert_eq!(parse_imm("0b101"), Ok(5));
        assert_eq!(parse_imm("0o17"), Ok(15));
        assert_eq!(parse_imm("017"), Ok(15));
        assert_eq!(parse_imm("0"), Ok(0));
        assert!(parse_imm("256").is_err());
        assert!(parse_imm("-1").is_err());
        assert!(parse_imm("+1").is_err());
        assert!(parse_imm("09").is_err());
    }

    #[test]
    fn register_beats_label_of_same_name() {
        let (isa, sym) = fixture();
        let mode = Mode::REGISTER | Mode::LABEL;
        assert_eq!(classify("r1", mode, &isa, &sym), Ok(Operand::Register(1)));
        // label slot only: falls through to the label
        assert_eq!(classify("r1", Mode::LABEL, &isa, &sym), Ok(Operand::Address(40)));
    }

    #[test]
    fn labels_and_literals() {
        let (isa, sym) = fixture();
        assert_eq!(classify("loop", LI, &isa, &sym), Ok(Operand::Address(12)));
        assert_eq!(classify("0x0c", LI, &isa, &sym), Ok(Operand::Immediate(12)));
        assert_eq!(classify("7", RI, &isa, &sym), Ok(Operand::Immediate(7)));
    }

    #[test]
    fn rejects_wrong_mode() {
        let (isa, sym) = fixture();
        assert_eq!(
            classify("5", Mode::REGISTER, &isa, &sym),
            Err(AsmError::ModeNotAllowed("5".into()))
        );
        assert_eq!(
            classify("pa", Mode::LABEL, &isa, &sym),
            Err(AsmError::ModeNotAllowed("pa".into()))
        );
    }

    #[test]
    fn register_in_jump_target_is_a_mode_error() {
        let (isa, sym) = fixture();
        assert_eq!(
            classify("r2", LI, &isa, &sym),
            Err(AsmError::ModeNotAllowed("r2".into()))
        );
        assert_eq!(
            classify("out", LI, &isa, &sym),
            Err(AsmError::ModeNotAllowed("out".into()))
        );
    }

    #[test]
    fn names_missing_symbols() {
        let (isa, sym) = fixture();
        assert_eq!(
            classify("nowhere", LI, &isa, &sym),
            Err(AsmError::UnknownLabel("nowhere".into()))
        );
        assert_eq!(
            classify("nowhere", Mode::LABEL, &isa, &sym),
            Err(AsmError::UnknownLabel("nowhere".into()))
        );
        assert_eq!(
            classify("r99", Mode::REGISTER, &isa, &sym),
            Err(AsmError::UnknownRegister("r99".into()))
        );
        assert!(matches!(
            classify("r99", RI, &isa, &sym),
            Err(AsmError::BadImmediate { .. })
        ));
    }

    #[test]
    fn wide_label_address_is_an_error() {
        let (isa, sym) = fixture();
        assert_eq!(
            classify("far", LI, &isa, &sym),
            Err(AsmError::AddressRange { name: "far".into(), address: 0x104 })
        );
    }
}
