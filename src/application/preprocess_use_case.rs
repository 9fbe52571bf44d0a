// ============================================================
// Layer 2 — PreprocessUseCase
// ============================================================
// Turns the train and dev dataset files into JSON-lines record
// files, one split at a time:
//
//   Step 1: Derive the output path  <input>l  (infra)
//   Step 2: Skip if it exists       (caching policy, lives HERE)
//   Step 3: Load the JSON document  (data - loader)
//   Step 4: Build capped records    (data - builder)
//   Step 5: Write JSON lines        (infra - jsonl)
//   Step 6: Log run statistics      (infra - stats)
//
// The splits share nothing, so each is processed independently;
// a failure in either aborts the run.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::{
    builder::{RecordBuilder, DEFAULT_EXAMPLE_LIMIT},
    loader::JsonDocumentLoader,
    tokenizer::TreebankTokenizer,
};
use crate::domain::traits::DocumentSource;
use crate::infra::{
    jsonl::{output_path, write_jsonl, JsonStyle},
    stats::RunStats,
};

// ─── Preprocessing Configuration ─────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    pub data_dir:      String,
    pub train_file:    String,
    pub dev_file:      String,
    pub example_limit: usize,
    /// Rebuild outputs even if `<input>l` already exists
    pub force:         bool,
    pub style:         JsonStyle,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            data_dir:      ".data/squad".to_string(),
            train_file:    "train-v2.0.json".to_string(),
            dev_file:      "dev-v2.0.json".to_string(),
            example_limit: DEFAULT_EXAMPLE_LIMIT,
            force:         false,
            style:         JsonStyle::Ascii,
        }
    }
}

/// What happened to one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitStatus {
    /// Output already present; nothing was read or written
    Skipped,
    Written(RunStats),
}

#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub split:  String,
    pub output: PathBuf,
    pub status: SplitStatus,
}

// ─── PreprocessUseCase ───────────────────────────────────────────────────────
pub struct PreprocessUseCase {
    config:  PreprocessConfig,
    builder: RecordBuilder<TreebankTokenizer>,
}

impl PreprocessUseCase {
    pub fn new(config: PreprocessConfig) -> Self {
        Self {
            config,
            builder: RecordBuilder::new(TreebankTokenizer::new()),
        }
    }

    /// Process the train split, then the dev split.
    pub fn execute(&self) -> Result<Vec<SplitOutcome>> {
        let dir = Path::new(&self.config.data_dir);

        tracing::info!("Preprocessing data files in '{}'", dir.display());

        let splits = [("train", &self.config.train_file), ("dev", &self.config.dev_file)];
        splits
            .iter()
            .map(|(label, file)| self.run_split(label, &dir.join(file)))
            .collect()
    }

    /// Preprocess one input file unless its output already exists.
    pub fn run_split(&self, label: &str, input: &Path) -> Result<SplitOutcome> {
        let output = output_path(input);

        if output.exists() && !self.config.force {
            tracing::info!(
                "Skipping {} split: '{}' already exists",
                label,
                output.display()
            );
            return Ok(SplitOutcome {
                split:  label.to_string(),
                output,
                status: SplitStatus::Skipped,
            });
        }

        let loader = JsonDocumentLoader::new(input);
        let stats  = self.preprocess_source(label, &loader, &output)?;

        Ok(SplitOutcome {
            split:  label.to_string(),
            output,
            status: SplitStatus::Written(stats),
        })
    }

    /// Load → build → write for any document source.
    pub fn preprocess_source<S: DocumentSource>(
        &self,
        label:  &str,
        source: &S,
        output: &Path,
    ) -> Result<RunStats> {
        let document = source.load()?;
        tracing::info!("Building {} records from {} articles", label, document.data.len());

        let set = self.builder.build_records(&document, self.config.example_limit)?;
        write_jsonl(&set.records, output, self.config.style)?;

        set.stats.log_summary(label);
        Ok(set.stats)
    }
}
