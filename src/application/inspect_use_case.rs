// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Reads an emitted `.jsonl` file back and summarises it:
// how many records, how many unanswerable, how many distinct
// questions, and how many survive a context-length threshold
// (the cut applied to training data before batching).
//
// Reference: Rust Book §8 (Collections)

use anyhow::Result;
use std::{collections::HashSet, fmt, path::PathBuf};

use crate::data::{dataset::RecordDataset, tokenizer::TreebankTokenizer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub records:    usize,
    pub impossible: usize,
    pub questions:  usize,
    /// Records left after the context threshold (all of them when disabled)
    pub kept:       usize,
    pub threshold:  usize,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "records:    {}", self.records)?;
        writeln!(f, "impossible: {}", self.impossible)?;
        writeln!(f, "questions:  {}", self.questions)?;
        if self.threshold > 0 {
            write!(f, "kept (context <= {} tokens): {}", self.threshold, self.kept)
        } else {
            write!(f, "kept: {} (no context threshold)", self.kept)
        }
    }
}

pub struct InspectUseCase {
    path:              PathBuf,
    context_threshold: usize,
}

impl InspectUseCase {
    pub fn new(path: impl Into<PathBuf>, context_threshold: usize) -> Self {
        Self { path: path.into(), context_threshold }
    }

    pub fn execute(&self) -> Result<InspectReport> {
        let dataset = RecordDataset::load(&self.path)?;

        let records    = dataset.len();
        let impossible = dataset.impossible_count();
        let questions  = dataset
            .records()
            .iter()
            .map(|r| r.id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let kept = dataset
            .filter_by_context_length(self.context_threshold, &TreebankTokenizer::new())
            .len();

        tracing::info!(
            "Inspected '{}': {} records, {} kept",
            self.path.display(),
            records,
            kept
        );

        Ok(InspectReport {
            records,
            impossible,
            questions,
            kept,
            threshold: self.context_threshold,
        })
    }
}
