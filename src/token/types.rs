//! Token types produced by the script lexer.

use std::ops::Range;

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Reserved word such as `function`, `workflow` or `if`
    Keyword,
    /// Bare word: command names, parameters without a dash, type names
    Identifier,
    /// `$name`, `${name}` or an `@name` splat
    Variable,
    /// Quoted string or here-string
    String,
    Number,
    /// Line or block comment
    Comment,
    /// Punctuation and `-word` operators
    Operator,
    /// Anything the lexer does not recognise
    Other,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Keyword => write!(f, "keyword"),
            TokenType::Identifier => write!(f, "identifier"),
            TokenType::Variable => write!(f, "variable"),
            TokenType::String => write!(f, "string"),
            TokenType::Number => write!(f, "number"),
            TokenType::Comment => write!(f, "comment"),
            TokenType::Operator => write!(f, "operator"),
            TokenType::Other => write!(f, "other"),
        }
    }
}

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenType,
    /// The exact source text of the token
    pub content: &'a str,
    /// Byte range of the token within the source
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenType, content: &'a str, span: Range<usize>) -> Self {
        Self {
            kind,
            content,
            span,
        }
    }

    /// True if this is the given keyword, compared case-insensitively.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenType::Keyword && self.content.eq_ignore_ascii_case(word)
    }
}
