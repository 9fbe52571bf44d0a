// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands `preprocess`, `inspect` and `tokenize`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, enums, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::preprocess_use_case::PreprocessConfig;
use crate::data::builder::DEFAULT_EXAMPLE_LIMIT;
use crate::infra::jsonl::JsonStyle;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tokenise the train/dev files and write aligned `.jsonl` records
    Preprocess(PreprocessArgs),

    /// Summarise an emitted `.jsonl` file
    Inspect(InspectArgs),

    /// Print the tokens of a piece of text, one per line
    Tokenize(TokenizeArgs),
}

/// Output style of each JSON line
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StyleArg {
    /// `{"key": value}` with spaced separators and non-ASCII escaped
    Ascii,
    /// serde_json's compact UTF-8 output
    Compact,
}

impl From<StyleArg> for JsonStyle {
    fn from(s: StyleArg) -> Self {
        match s {
            StyleArg::Ascii  => JsonStyle::Ascii,
            StyleArg::Compact => JsonStyle::Compact,
        }
    }
}

/// All arguments for the `preprocess` command.
#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Directory holding the dataset files
    #[arg(long, default_value = ".data/squad")]
    pub data_dir: String,

    /// Training split file name, relative to --data-dir
    #[arg(long, default_value = "train-v2.0.json")]
    pub train_file: String,

    /// Dev split file name, relative to --data-dir
    #[arg(long, default_value = "dev-v2.0.json")]
    pub dev_file: String,

    /// Stop after the first article that pushes the record count past this
    #[arg(long, default_value_t = DEFAULT_EXAMPLE_LIMIT)]
    pub example_limit: usize,

    /// Rebuild outputs even if `<file>l` already exists
    #[arg(long)]
    pub force: bool,

    /// JSON rendering of each output line
    #[arg(long, value_enum, default_value_t = StyleArg::Ascii)]
    pub style: StyleArg,
}

/// Convert CLI PreprocessArgs into the application-layer config.
/// The application layer never sees clap types.
impl From<PreprocessArgs> for PreprocessConfig {
    fn from(a: PreprocessArgs) -> Self {
        PreprocessConfig {
            data_dir:      a.data_dir,
            train_file:    a.train_file,
            dev_file:      a.dev_file,
            example_limit: a.example_limit,
            force:         a.force,
            style:         a.style.into(),
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to a `.jsonl` file written by `preprocess`
    #[arg(long)]
    pub path: String,

    /// Count only records whose context has at most this many tokens (0 = off)
    #[arg(long, default_value_t = 0)]
    pub context_threshold: usize,
}

/// All arguments for the `tokenize` command
#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// Text to tokenise
    #[arg(long)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_preprocess_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["squad-prep", "preprocess"]).unwrap();
        let Commands::Preprocess(args) = cli.command else {
            panic!("expected preprocess");
        };
        let config: PreprocessConfig = args.into();
        let default = PreprocessConfig::default();

        assert_eq!(config.data_dir, default.data_dir);
        assert_eq!(config.train_file, default.train_file);
        assert_eq!(config.dev_file, default.dev_file);
        assert_eq!(config.example_limit, 20_000);
        assert!(!config.force);
        assert_eq!(config.style, JsonStyle::Ascii);
    }

    #[test]
    fn test_preprocess_flags() {
        let cli = Cli::try_parse_from([
            "squad-prep", "preprocess",
            "--data-dir", "/tmp/squad",
            "--example-limit", "10",
            "--force",
            "--style", "compact",
        ])
        .unwrap();
        let Commands::Preprocess(args) = cli.command else {
            panic!("expected preprocess");
        };
        let config: PreprocessConfig = args.into();
        assert_eq!(config.data_dir, "/tmp/squad");
        assert_eq!(config.example_limit, 10);
        assert!(config.force);
        assert_eq!(config.style, JsonStyle::Compact);
    }

    #[test]
    fn test_inspect_requires_path() {
        assert!(Cli::try_parse_from(["squad-prep", "inspect"]).is_err());
    }
}
