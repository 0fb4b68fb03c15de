//! # Validate Subcommands
//!
//! `validate` checks a document against a schema file. `check-params`
//! checks a parameter file against the schema synthesized from a template.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pdv_schema::SchemaRegistry;

use crate::input::{load_config, read_bytes, read_document, read_text};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document to validate (YAML or JSON).
    #[arg(long)]
    pub instance: PathBuf,

    /// Schema file.
    #[arg(long)]
    pub schema: PathBuf,

    /// Resource ID for the schema, optionally with a `#/pointer` fragment.
    /// Defaults to the schema file name.
    #[arg(long)]
    pub resource_id: Option<String>,

    /// Configuration document.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the check-params subcommand.
#[derive(Args, Debug)]
pub struct CheckParamsArgs {
    /// Parameter values file (YAML or JSON).
    #[arg(long)]
    pub params: PathBuf,

    /// Parameterized template the values are meant for.
    #[arg(long)]
    pub template: PathBuf,

    /// Definitions schema used to look up placeholder fragments.
    #[arg(long)]
    pub definitions: PathBuf,

    /// Base input schema.
    #[arg(long)]
    pub base: PathBuf,

    /// Configuration document.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Validate `--instance` against `--schema`.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let registry = SchemaRegistry::with_config(config.validator);

    let resource_id = match &args.resource_id {
        Some(id) => id.clone(),
        None => args
            .schema
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", args.schema.display()))?,
    };

    let instance = read_bytes(&args.instance)?;
    let schema = read_bytes(&args.schema)?;
    registry
        .validate_document(&instance, &schema, &resource_id)
        .with_context(|| format!("{} failed validation", args.instance.display()))?;

    writeln!(out, "{}: ok", args.instance.display())?;
    Ok(())
}

/// Validate `--params` against the schema synthesized from `--template`.
pub fn run_check_params(args: &CheckParamsArgs, out: &mut impl Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let registry = SchemaRegistry::with_config(config.validator);

    let params = read_bytes(&args.params)?;
    let template = read_text(&args.template)?;
    let definitions = read_document(&args.definitions)?;
    let base = read_document(&args.base)?;

    pdv_schema::validate_input_params(
        &registry,
        &params,
        &template,
        &definitions,
        &base,
        &config.synthesis,
    )
    .with_context(|| format!("{} failed validation", args.params.display()))?;

    writeln!(out, "{}: ok", args.params.display())?;
    Ok(())
}
