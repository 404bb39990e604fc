//! Lexical analysis of PowerShell scripts.
//!
//! The lexer classifies raw script text into an ordered token stream. It is
//! deliberately shallow: there is no grammar, only enough classification for
//! callers to tell keywords from identifiers.

mod lexer;
mod types;

pub use lexer::tokenize;
pub use types::{Token, TokenType};
