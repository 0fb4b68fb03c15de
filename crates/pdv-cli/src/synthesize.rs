//! # Synthesize Subcommand
//!
//! Prints the input-parameter schema synthesized for a template.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::input::{load_config, read_document, read_text};

/// Arguments for the synthesize subcommand.
#[derive(Args, Debug)]
pub struct SynthesizeArgs {
    /// Parameterized template (YAML or JSON).
    #[arg(long)]
    pub template: PathBuf,

    /// Definitions schema used to look up placeholder fragments.
    #[arg(long)]
    pub definitions: PathBuf,

    /// Base input schema the synthesized properties are merged into.
    #[arg(long)]
    pub base: PathBuf,

    /// Configuration document.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the schema here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Synthesize and emit pretty-printed JSON.
pub fn run(args: &SynthesizeArgs, out: &mut impl Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let template = read_text(&args.template)?;
    let definitions = read_document(&args.definitions)?;
    let base = read_document(&args.base)?;

    let schema = pdv_schema::synthesize(&template, &definitions, &base, &config.synthesis)
        .with_context(|| format!("cannot synthesize schema for {}", args.template.display()))?;
    let rendered = serde_json::to_string_pretty(&schema)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("cannot write {}", path.display()))?;
            tracing::info!(path = %path.display(), "input schema written");
        }
        None => writeln!(out, "{rendered}")?,
    }
    Ok(())
}
