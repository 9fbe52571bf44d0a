// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All work is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `preprocess` : dataset JSON → aligned JSON-lines records
//   2. `inspect`    : summary of an emitted JSON-lines file
//   3. `tokenize`   : show how a string is tokenised
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, PreprocessArgs, TokenizeArgs};

use crate::application::preprocess_use_case::SplitStatus;

/// The main CLI struct. clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "squad-prep",
    version,
    about = "Tokenise SQuAD-style QA data and align answer offsets to word tokens."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Preprocess(args) => run_preprocess(args),
            Commands::Inspect(args)    => run_inspect(args),
            Commands::Tokenize(args)   => run_tokenize(args),
        }
    }
}

/// Handles the `preprocess` subcommand.
fn run_preprocess(args: PreprocessArgs) -> Result<()> {
    use crate::application::preprocess_use_case::PreprocessUseCase;

    let use_case = PreprocessUseCase::new(args.into());

    for outcome in use_case.execute()? {
        match outcome.status {
            SplitStatus::Skipped => {
                println!("{}: '{}' exists, skipped", outcome.split, outcome.output.display())
            }
            SplitStatus::Written(stats) => {
                println!("{}: {} → '{}'", outcome.split, stats, outcome.output.display())
            }
        }
    }
    Ok(())
}

/// Handles the `inspect` subcommand.
fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let report = InspectUseCase::new(args.path, args.context_threshold).execute()?;
    println!("{report}");
    Ok(())
}

/// Handles the `tokenize` subcommand.
fn run_tokenize(args: TokenizeArgs) -> Result<()> {
    use crate::data::tokenizer::TreebankTokenizer;
    use crate::domain::traits::WordTokenizer;

    let tokens = TreebankTokenizer::new().tokenize(&args.text);
    for (i, token) in tokens.iter().enumerate() {
        println!("{i}\t{token}");
    }
    Ok(())
}
