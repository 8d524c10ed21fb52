pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Lexer for the numeric prefix of a raw span.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
enum NumberPrefix {
    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]+")]
    Number,
}

/// Returns the longest prefix of the given text that is a numeric literal, such as `3`, `3.`,
/// `3.25` or `.25`.
///
/// The prefix ends at the first character that cannot continue the literal, so `3.5.2` has the
/// prefix `3.5`, and `2x` has the prefix `2`.
pub fn number_prefix(text: &str) -> Option<&str> {
    let mut lexer = NumberPrefix::lexer(text);
    match lexer.next() {
        Some(Ok(NumberPrefix::Number)) => Some(lexer.slice()),
        _ => None,
    }
}

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer, with whitespace
/// removed.
///
/// Every character of the input belongs to some token kind, so the lexer never fails. Should it
/// fail anyway, the offending character is kept as a [`TokenKind::Raw`] token so that the parser
/// reports it.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let kind = result.unwrap_or(TokenKind::Raw);
        if kind == TokenKind::Whitespace {
            continue;
        }
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}
