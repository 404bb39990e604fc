//! Declaration extraction from a token stream.

use super::types::DeclarationKind;
use crate::token::{Token, TokenType, tokenize};

/// A declaration found in source text, before it is tied to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub name: &'a str,
    pub kind: DeclarationKind,
}

/// Find `function`/`workflow` declarations in token order.
///
/// The token immediately after a declaring keyword is taken as the name,
/// whatever its type. A keyword with no following token is skipped.
pub fn declarations<'a>(tokens: &[Token<'a>]) -> Vec<Declaration<'a>> {
    let mut found = Vec::new();

    for (idx, token) in tokens.iter().enumerate() {
        let kind = match token.kind {
            TokenType::Keyword => match DeclarationKind::from_token(token) {
                Some(kind) => kind,
                None => continue,
            },
            TokenType::Identifier
            | TokenType::Variable
            | TokenType::String
            | TokenType::Number
            | TokenType::Comment
            | TokenType::Operator
            | TokenType::Other => continue,
        };

        match tokens.get(idx + 1) {
            Some(next) => found.push(Declaration {
                name: next.content,
                kind,
            }),
            None => {
                tracing::debug!(
                    keyword = token.content,
                    offset = token.span.start,
                    "declaring keyword is the last token; skipping"
                );
            }
        }
    }

    found
}

/// Tokenize `source` and return its declarations.
pub fn scan_source(source: &str) -> Vec<Declaration<'_>> {
    declarations(&tokenize(source))
}
