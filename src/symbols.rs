use crate::error::AsmError;
use std::collections::{HashMap, hash_map::Entry};

/// Label name -> byte address. Written during sizing, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    labels: HashMap<String, u16>,
    /// Total program size in bytes.
    pub length: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, address: u16) -> Result<(), AsmError> {
        match self.labels.entry(name.to_string()) {
            Entry::Occupied(_) => Err(AsmError::DuplicateLabel(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(address);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_redefinition() {
        let mut sym = SymbolTable::new();
        sym.define("loop", 4).unwrap();
        assert_eq!(
            sym.define("loop", 8),
            Err(AsmError::DuplicateLabel("loop".into()))
        );
        assert_eq!(sym.get("loop"), Some(4));
    }
}
