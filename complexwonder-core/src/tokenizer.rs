//! Lexer for expression strings.
//!
//! Produces identifiers, unsigned decimal literals, the five arithmetic
//! operators and parentheses. A leading `-` is always the minus operator,
//! never part of a literal. Whitespace separates tokens and is discarded.

use crate::SyntaxError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the tokenizer treats characters outside the lexeme grammar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenizerMode {
    /// Drop unknown characters and report them in [`TokenStream::skipped`].
    #[default]
    Lenient,
    /// Fail on the first unknown character.
    Strict,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "{name}"),
            TokenKind::Number(value) => write!(f, "{value}"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
        }
    }
}

/// A lexeme and the byte offset where it starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// Tokens in source order, plus any characters the lenient mode dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub skipped: Vec<(usize, char)>,
}

/// Tokenize in lenient mode. Never fails.
pub fn tokenize(input: &str) -> TokenStream {
    let mut stream = TokenStream::default();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let mut end = offset;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            stream.tokens.push(Token {
                kind: TokenKind::Ident(input[offset..end].to_string()),
                offset,
            });
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let end = scan_number(input, offset);
            if end == offset {
                // A lone '.' is not a literal.
                stream.skipped.push((offset, ch));
                chars.next();
                continue;
            }
            while chars.peek().is_some_and(|&(i, _)| i < end) {
                chars.next();
            }
            match input[offset..end].parse::<f64>() {
                Ok(value) => stream.tokens.push(Token {
                    kind: TokenKind::Number(value),
                    offset,
                }),
                Err(_) => stream.skipped.push((offset, ch)),
            }
            continue;
        }

        let kind = match ch {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '^' => Some(TokenKind::Caret),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            _ => None,
        };
        match kind {
            Some(kind) => stream.tokens.push(Token { kind, offset }),
            None => stream.skipped.push((offset, ch)),
        }
        chars.next();
    }

    stream
}

/// Tokenize with an explicit mode. Only [`TokenizerMode::Strict`] can fail.
pub fn tokenize_with_mode(input: &str, mode: TokenizerMode) -> Result<TokenStream, SyntaxError> {
    let stream = tokenize(input);
    if mode == TokenizerMode::Strict {
        if let Some(&(offset, ch)) = stream.skipped.first() {
            return Err(SyntaxError::UnrecognizedCharacter { ch, offset });
        }
    }
    Ok(stream)
}

/// End offset of the literal `digits ('.' digits*)? | '.' digits+` at `start`.
/// Returns `start` when no literal begins there.
fn scan_number(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - start;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = frac_end;
        }
    }
    end
}
