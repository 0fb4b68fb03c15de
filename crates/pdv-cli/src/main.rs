//! # pdv CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Parameterized data validator.
///
/// Extracts placeholders from parameterized templates, synthesizes the
/// schema their parameter values must satisfy, and validates documents.
#[derive(Parser, Debug)]
#[command(name = "pdv", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List placeholder occurrences and bindings in a template.
    Tokens(pdv_cli::tokens::TokensArgs),
    /// Print the input-parameter schema for a template.
    Synthesize(pdv_cli::synthesize::SynthesizeArgs),
    /// Validate a document against a schema file.
    Validate(pdv_cli::validate::ValidateArgs),
    /// Validate a parameter file against a parameterized template.
    CheckParams(pdv_cli::validate::CheckParamsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Commands::Tokens(args) => pdv_cli::tokens::run(args, &mut stdout),
        Commands::Synthesize(args) => pdv_cli::synthesize::run(args, &mut stdout),
        Commands::Validate(args) => pdv_cli::validate::run_validate(args, &mut stdout),
        Commands::CheckParams(args) => pdv_cli::validate::run_check_params(args, &mut stdout),
    }
}
