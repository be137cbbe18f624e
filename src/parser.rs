use crate::{
    error::{AsmError, LineError},
    lexer::{self, Token},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Blank,                // empty or comment-only
    Label(String),        // <label>:
    Inst {
        mnemonic: String,
        operands: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    /// 0-based line number.
    pub number: usize,
    pub text: String,
    pub item: Item,
}

/// A tokenized source unit. Both passes read it; neither mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub lines: Vec<SourceLine>,
}

impl Program {
    pub fn parse(src: &str) -> Result<Self, LineError> {
        let lines = src
            .lines()
            .enumerate()
            .map(|(number, text)| {
                let item = parse_line(text).map_err(|e| e.at(number))?;
                Ok(SourceLine {
                    number,
                    text: text.to_string(),
                    item,
                })
            })
            .collect::<Result<Vec<_>, LineError>>()?;
        Ok(Self { lines })
    }
}

fn parse_line(text: &str) -> Result<Item, AsmError> {
    let mut tokens = lexer::tokenize(text)?.into_iter();
    match tokens.next() {
        None => Ok(Item::Blank),
        // anything after a label on the same line is ignored
        Some(Token::Label(name)) => Ok(Item::Label(name)),
        Some(Token::Word(mnemonic)) => {
            let operands = tokens
                .map(|tok| match tok {
                    Token::Word(w) => Ok(w),
                    Token::Label(name) => {
                        Err(AsmError::Syntax(format!("unexpected label `{name}:`")))
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Item::Inst { mnemonic, operands })
        }
    }
}
