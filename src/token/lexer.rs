//! PowerShell lexer built on `logos`.
//!
//! Only enough of the dialect is recognised to classify keywords and
//! identifiers reliably:
//! - comments (`# ...`, `<# ... #>`) and strings (including here-strings)
//!   are consumed whole so keywords inside them never surface as keywords
//! - keywords match case-insensitively, as the language does
//! - verb-noun command names (`Get-Thing`) lex as a single identifier, and
//!   identifiers may use any Unicode letter
//! - `"..."` strings swallow their `$( ... )` subexpressions, nested
//!   quotes included

use super::types::{Token, TokenType};
use logos::{Lexer, Logos};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"([ \t\r\n\f]|`\r?\n)+")]
enum RawToken {
    #[token("begin", ignore(ascii_case))]
    #[token("break", ignore(ascii_case))]
    #[token("catch", ignore(ascii_case))]
    #[token("class", ignore(ascii_case))]
    #[token("continue", ignore(ascii_case))]
    #[token("data", ignore(ascii_case))]
    #[token("define", ignore(ascii_case))]
    #[token("do", ignore(ascii_case))]
    #[token("dynamicparam", ignore(ascii_case))]
    #[token("else", ignore(ascii_case))]
    #[token("elseif", ignore(ascii_case))]
    #[token("end", ignore(ascii_case))]
    #[token("enum", ignore(ascii_case))]
    #[token("exit", ignore(ascii_case))]
    #[token("filter", ignore(ascii_case))]
    #[token("finally", ignore(ascii_case))]
    #[token("for", ignore(ascii_case))]
    #[token("foreach", ignore(ascii_case))]
    #[token("from", ignore(ascii_case))]
    #[token("function", ignore(ascii_case))]
    #[token("hidden", ignore(ascii_case))]
    #[token("if", ignore(ascii_case))]
    #[token("in", ignore(ascii_case))]
    #[token("inlinescript", ignore(ascii_case))]
    #[token("parallel", ignore(ascii_case))]
    #[token("param", ignore(ascii_case))]
    #[token("process", ignore(ascii_case))]
    #[token("return", ignore(ascii_case))]
    #[token("sequence", ignore(ascii_case))]
    #[token("static", ignore(ascii_case))]
    #[token("switch", ignore(ascii_case))]
    #[token("throw", ignore(ascii_case))]
    #[token("trap", ignore(ascii_case))]
    #[token("try", ignore(ascii_case))]
    #[token("until", ignore(ascii_case))]
    #[token("using", ignore(ascii_case))]
    #[token("var", ignore(ascii_case))]
    #[token("while", ignore(ascii_case))]
    #[token("workflow", ignore(ascii_case))]
    Keyword,

    #[regex(r"[\p{L}_][\p{L}\p{N}_-]*(:[\p{L}_][\p{L}\p{N}_-]*)?")]
    Identifier,

    #[regex(r"\$(\{[^}]*\}|[\p{L}\p{N}_?^$:]+)")]
    #[regex(r"@[\p{L}_][\p{L}\p{N}_]*")]
    Variable,

    #[token("\"", expandable_string)]
    #[regex(r"'([^']|'')*'")]
    #[token("@\"", double_here_string)]
    #[token("@'", single_here_string)]
    String,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"#[^\n]*")]
    #[token("<#", block_comment)]
    Comment,

    #[regex(r"-\p{L}+")]
    #[regex(r"[{}()\[\];,.=|&+*/%!<>:@?-]")]
    Operator,
}

fn classify(raw: RawToken) -> TokenType {
    match raw {
        RawToken::Keyword => TokenType::Keyword,
        RawToken::Identifier => TokenType::Identifier,
        RawToken::Variable => TokenType::Variable,
        RawToken::String => TokenType::String,
        RawToken::Number => TokenType::Number,
        RawToken::Comment => TokenType::Comment,
        RawToken::Operator => TokenType::Operator,
    }
}

/// Consume input through `terminator`, or to end of input if it never appears.
fn consume_through(lex: &mut Lexer<RawToken>, terminator: &str) {
    let rest = lex.remainder();
    let len = rest
        .find(terminator)
        .map_or(rest.len(), |idx| idx + terminator.len());
    lex.bump(len);
}

fn block_comment(lex: &mut Lexer<RawToken>) {
    consume_through(lex, "#>");
}

/// Consume the rest of a `"..."` string, including any `$( ... )`
/// subexpressions and the strings nested inside them.
fn expandable_string(lex: &mut Lexer<RawToken>) {
    let len = expandable_string_len(lex.remainder().as_bytes());
    lex.bump(len);
}

/// Length of a double-quoted string body up to and including its closing
/// quote, or all of `rest` if it is unterminated.
fn expandable_string_len(rest: &[u8]) -> usize {
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'`' => i += 2,
            b'"' if rest.get(i + 1) == Some(&b'"') => i += 2,
            b'"' => return i + 1,
            b'$' if rest.get(i + 1) == Some(&b'(') => {
                i += 2;
                i += subexpression_len(&rest[i..]);
            }
            _ => i += 1,
        }
    }
    rest.len()
}

/// Length of a `$(` subexpression body up to and including the matching `)`.
fn subexpression_len(rest: &[u8]) -> usize {
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            b'"' => {
                i += 1 + expandable_string_len(&rest[i + 1..]);
                continue;
            }
            b'\'' => {
                i += 1 + verbatim_string_len(&rest[i + 1..]);
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    rest.len()
}

/// Length of a single-quoted string body up to and including its closing quote.
fn verbatim_string_len(rest: &[u8]) -> usize {
    let mut i = 0;
    while i < rest.len() {
        if rest[i] == b'\'' {
            if rest.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    rest.len()
}

fn double_here_string(lex: &mut Lexer<RawToken>) {
    consume_through(lex, "\n\"@");
}

fn single_here_string(lex: &mut Lexer<RawToken>) {
    consume_through(lex, "\n'@");
}

/// Split script source into an ordered sequence of classified tokens.
///
/// Never fails: characters the lexer cannot classify come back as
/// `TokenType::Other` tokens.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let kind = match result {
            Ok(raw) => classify(raw),
            Err(()) => TokenType::Other,
        };
        tokens.push(Token::new(kind, lexer.slice(), lexer.span()));
    }

    tokens
}
