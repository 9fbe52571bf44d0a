// ============================================================
// Layer 6 — Run Statistics
// ============================================================
// Counters collected while a document is flattened into records.
//
// Counters per run:
//   - articles:   articles consumed before stopping
//   - paragraphs: contexts tokenised
//   - questions:  QA entries visited
//   - records:    OutputRecords emitted
//   - impossible: records for unanswerable questions
//   - clamped:    answers whose offsets ran past the tokens
//   - capped:     true if the example limit stopped the run early
//
// A non-zero `clamped` usually means the dataset has offsets
// that do not match its context text and is worth inspecting.
//
// Reference: Rust Book §5 (Structs), §10 (Display trait)

use std::fmt;

use crate::data::builder::ArticleBatch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub articles:   usize,
    pub paragraphs: usize,
    pub questions:  usize,
    pub records:    usize,
    pub impossible: usize,
    pub clamped:    usize,
    pub capped:     bool,
}

impl RunStats {
    /// Fold one article's counters into the run totals.
    pub fn absorb(&mut self, batch: &ArticleBatch) {
        self.articles   += 1;
        self.paragraphs += batch.paragraphs;
        self.questions  += batch.questions;
        self.records    += batch.records.len();
        self.impossible += batch.records.iter().filter(|r| r.impossible()).count();
        self.clamped    += batch.clamped;
    }

    /// Emit the totals as one structured log line.
    pub fn log_summary(&self, label: &str) {
        tracing::info!(
            split      = label,
            articles   = self.articles,
            paragraphs = self.paragraphs,
            questions  = self.questions,
            records    = self.records,
            impossible = self.impossible,
            clamped    = self.clamped,
            capped     = self.capped,
            "Preprocessing finished"
        );

        if self.clamped > 0 {
            tracing::warn!(
                "{}: {} answer(s) had offsets beyond their context and were clamped",
                label,
                self.clamped
            );
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records ({} impossible) from {} questions in {} paragraphs / {} articles",
            self.records, self.impossible, self.questions, self.paragraphs, self.articles,
        )?;
        if self.clamped > 0 {
            write!(f, ", {} clamped", self.clamped)?;
        }
        if self.capped {
            write!(f, ", stopped at example limit")?;
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::OutputRecord;

    fn record(is_impossible: u8) -> OutputRecord {
        OutputRecord {
            id:              "id".to_string(),
            context:         "c".to_string(),
            question:        "q".to_string(),
            answer:          String::new(),
            is_impossible,
            s_idx:           0,
            e_idx:           0,
            augmented_s_idx: 0,
            augmented_e_idx: 0,
        }
    }

    #[test]
    fn test_absorb_accumulates() {
        let batch = ArticleBatch {
            records:    vec![record(0), record(1), record(1)],
            paragraphs: 2,
            questions:  3,
            clamped:    1,
        };
        let mut stats = RunStats::default();
        stats.absorb(&batch);
        stats.absorb(&batch);

        assert_eq!(stats.articles, 2);
        assert_eq!(stats.paragraphs, 4);
        assert_eq!(stats.questions, 6);
        assert_eq!(stats.records, 6);
        assert_eq!(stats.impossible, 4);
        assert_eq!(stats.clamped, 2);
    }

    #[test]
    fn test_display_mentions_clamps_and_cap() {
        let stats = RunStats { records: 3, clamped: 1, capped: true, ..RunStats::default() };
        let text  = stats.to_string();
        assert!(text.starts_with("3 records"));
        assert!(text.contains("1 clamped"));
        assert!(text.contains("example limit"));
    }
}
