//! Token dump: `pslocate tokens`.

use anyhow::{Context, Result};
use std::path::Path;

use pslocate::token::tokenize;

pub fn cmd_tokens(file: &Path) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read script file: {}", file.display()))?;

    for token in tokenize(&source) {
        println!("{:>6}  {:<10}  {:?}", token.span.start, token.kind.to_string(), token.content);
    }
    Ok(())
}
