use crate::error::AsmError;
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
// 공백, 쉼표, `;`/`#` 주석은 건너뜀
#[logos(skip r"([ \t\r\n\f,]+|[;#][^\n]*)")]
pub enum Token {
    // ── Label declaration ────────────────────
    #[regex(r"[^ \t\r\n\f,;#:]+:", |lex| {
        let s = lex.slice();
        s[..s.len() - 1].to_string()
    })]
    Label(String),

    // ── Mnemonic / register / label ref / number
    #[regex(r"[^ \t\r\n\f,;#:]+", |lex| lex.slice().to_string())]
    Word(String),
}

/// Splits one source line into tokens.
pub fn tokenize(line: &str) -> Result<Vec<Token>, AsmError> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next() {
        match tok {
            Ok(tok) => tokens.push(tok),
            Err(()) => {
                return Err(AsmError::Syntax(format!(
                    "unexpected `{}` at column {}",
                    lexer.slice(),
                    lexer.span().start
                )));
            }
        }
    }
    Ok(tokens)
}
