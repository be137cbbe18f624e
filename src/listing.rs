use crate::encoder::Word;
use std::fmt;

/// Literal style for rendered bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Radix {
    #[default]
    Hex,
    #[value(name = "bin")]
    Binary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Label {
        line: usize,
        text: String,
    },
    Instruction {
        line: usize,
        /// Byte address of the first word.
        address: u16,
        text: String,
        words: Vec<Word>,
    },
}

/// Assembled output: annotated words in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub entries: Vec<Entry>,
}

impl Listing {
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.entries.iter().flat_map(|e| match e {
            Entry::Instruction { words, .. } => words.as_slice(),
            Entry::Label { .. } => &[][..],
        })
    }

    /// Machine code as a flat byte stream.
    pub fn bytes(&self) -> Vec<u8> {
        self.words().flat_map(|w| w.bytes()).collect()
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.words().count() * 4
    }

    pub fn is_empty(&self) -> bool {
        self.words().next().is_none()
    }

    /// Borrowed view that formats the listing in `radix`.
    pub fn display(&self, radix: Radix) -> Rendered<'_> {
        Rendered { listing: self, radix }
    }

    pub fn render(&self, radix: Radix) -> String {
        self.display(radix).to_string()
    }
}

pub struct Rendered<'a> {
    listing: &'a Listing,
    radix: Radix,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.listing.entries {
            match entry {
                Entry::Label { text, .. } => writeln!(f, "# {text}")?,
                Entry::Instruction { address, text, words, .. } => {
                    writeln!(f, "#({address}) {text}")?;
                    for w in words {
                        match self.radix {
                            Radix::Hex => writeln!(f, "{w}")?,
                            Radix::Binary => writeln!(f, "{w:#}")?,
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Listing {
        Listing {
            entries: vec![
                Entry::Label { line: 0, text: "main:".into() },
                Entry::Instruction {
                    line: 1,
                    address: 0,
                    text: "    ret".into(),
                    words: vec![Word::from([0x07, 0xFF, 0xFF, 0x06])],
                },
            ],
        }
    }

    #[test]
    fn renders_hex() {
        assert_eq!(
            sample().render(Radix::Hex),
            "# main:\n#(0)     ret\n0x07 0xff 0xff 0x06\n"
        );
    }

    #[test]
    fn renders_binary() {
        assert_eq!(
            sample().render(Radix::Binary),
            "# main:\n#(0)     ret\n0b00000111 0b11111111 0b11111111 0b00000110\n"
        );
    }

    #[test]
    fn display_view_matches_render() {
        let l = sample();
        assert_eq!(format!("{}", l.display(Radix::Hex)), l.render(Radix::Hex));
        assert_eq!(Listing::default().render(Radix::Binary), "");
    }

    #[test]
    fn flattens_bytes() {
        let l = sample();
        assert_eq!(l.bytes(), vec![0x07, 0xFF, 0xFF, 0x06]);
        assert_eq!(l.len(), 4);
        assert!(!l.is_empty());
        assert!(Listing::default().is_empty());
    }
}
