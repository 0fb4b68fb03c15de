//! # Tokens Subcommand
//!
//! Lists placeholder occurrences found in a template and the token →
//! definition-key bindings they produce.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pdv_schema::{build_bindings, find_tokens};

use crate::input::{load_config, read_text};

/// Arguments for the tokens subcommand.
#[derive(Args, Debug)]
pub struct TokensArgs {
    /// Parameterized template (YAML or JSON).
    #[arg(long)]
    pub template: PathBuf,

    /// Placeholder pattern; overrides the configured one.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Configuration document.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Print each occurrence, then each binding as `token -> definition_key`.
pub fn run(args: &TokensArgs, out: &mut impl Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let synthesis = &config.synthesis;
    let pattern = args
        .pattern
        .as_deref()
        .unwrap_or(synthesis.placeholder_pattern.as_str());

    let text = read_text(&args.template)?;
    let tokens = find_tokens(&text, pattern)?;
    for token in &tokens {
        writeln!(out, "{}", token.trim())?;
    }

    let bindings = build_bindings(&tokens, &synthesis.separator, &synthesis.value_prefix)?;
    writeln!(out)?;
    for (token, definition_key) in bindings.iter() {
        writeln!(out, "{token} -> {definition_key}")?;
    }
    Ok(())
}
