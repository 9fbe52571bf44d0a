// ============================================================
// Layer 4 — Record Builder
// ============================================================
// Flattens a nested QA document into one OutputRecord per
// (question, answer candidate) pair.
//
//   Document
//     └── Article                  ← one batch per article
//           └── Paragraph          ← context tokenised ONCE here
//                 └── QaEntry
//                       └── AnswerCandidate → OutputRecord
//
// Two halves:
//   - Producer: `RecordBuilder::articles` lazily yields one
//     `ArticleBatch` per article, in document order
//   - Consumer: `take_capped` appends batches and stops after
//     the first batch that pushes the running count OVER the
//     limit. The check runs per article, so the final article
//     is always emitted whole and the total may exceed the limit.
//
// Impossible questions:
//   - candidates come from `plausible_answers`
//   - `answer` is blanked and s_idx == e_idx == len(tokens)
//   - augmented_s_idx / augmented_e_idx keep the aligned span
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Rajpurkar et al. (2018) - SQuAD 2.0

use anyhow::Result;

use crate::data::aligner::{AlignmentOutcome, OffsetAligner};
use crate::domain::document::{Article, Paragraph, SquadDocument};
use crate::domain::record::OutputRecord;
use crate::domain::traits::WordTokenizer;
use crate::infra::stats::RunStats;

/// Article-granularity ceiling on emitted records.
pub const DEFAULT_EXAMPLE_LIMIT: usize = 20_000;

/// Every record produced from one article, plus counters.
#[derive(Debug, Clone, Default)]
pub struct ArticleBatch {
    pub records:    Vec<OutputRecord>,
    pub paragraphs: usize,
    pub questions:  usize,
    /// Answers whose raw offsets ran past the tokens
    pub clamped:    usize,
}

/// Records accepted by the consumer, with the run counters.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub records: Vec<OutputRecord>,
    pub stats:   RunStats,
}

/// Builds OutputRecords from a document with a given tokenizer.
pub struct RecordBuilder<T: WordTokenizer> {
    tokenizer: T,
}

impl<T: WordTokenizer> RecordBuilder<T> {
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Lazily produce one batch per article.
    ///
    /// Nothing is tokenised until the iterator is pulled, so a
    /// consumer that stops early never touches later articles.
    pub fn articles<'a>(
        &'a self,
        document: &'a SquadDocument,
    ) -> impl Iterator<Item = Result<ArticleBatch>> + 'a {
        document.data.iter().map(move |article| self.article_batch(article))
    }

    /// Produce and consume in one go, honouring `limit`.
    pub fn build_records(&self, document: &SquadDocument, limit: usize) -> Result<RecordSet> {
        take_capped(self.articles(document), limit)
    }

    fn article_batch(&self, article: &Article) -> Result<ArticleBatch> {
        let mut batch = ArticleBatch::default();
        for paragraph in &article.paragraphs {
            self.paragraph_records(paragraph, &mut batch)?;
        }
        Ok(batch)
    }

    /// Tokenise the context once and align every answer of every
    /// question against it.
    fn paragraph_records(&self, paragraph: &Paragraph, batch: &mut ArticleBatch) -> Result<()> {
        let context = &paragraph.context;
        let tokens  = self.tokenizer.tokenize(context);
        let aligner = OffsetAligner::new(context, &tokens);

        batch.paragraphs += 1;

        for qa in &paragraph.qas {
            batch.questions += 1;

            for candidate in qa.candidates()? {
                let alignment = aligner.align(candidate.answer_start, candidate.answer_end());

                if alignment.outcome == AlignmentOutcome::Clamped {
                    batch.clamped += 1;
                    tracing::warn!(
                        "Answer offsets for '{}' ({}..{}) run past the context tokens; clamped to {}..={}",
                        qa.id,
                        candidate.answer_start,
                        candidate.answer_end(),
                        alignment.span.start,
                        alignment.span.end,
                    );
                }

                let augmented = alignment.span;
                let (answer, s_idx, e_idx) = if qa.is_impossible {
                    // synthetic "no answer" position one past the last token
                    (String::new(), tokens.len(), tokens.len())
                } else {
                    (candidate.text.clone(), augmented.start, augmented.end)
                };

                batch.records.push(OutputRecord {
                    id:              qa.id.clone(),
                    context:         context.clone(),
                    question:        qa.question.clone(),
                    answer,
                    is_impossible:   u8::from(qa.is_impossible),
                    s_idx,
                    e_idx,
                    augmented_s_idx: augmented.start,
                    augmented_e_idx: augmented.end,
                });
            }
        }

        Ok(())
    }
}

/// Consume article batches until the running record count
/// exceeds `limit`.
///
/// The limit is checked after each whole batch: the batch that
/// crosses the limit is kept, and no later batch is pulled.
pub fn take_capped<I>(batches: I, limit: usize) -> Result<RecordSet>
where
    I: IntoIterator<Item = Result<ArticleBatch>>,
{
    let mut set = RecordSet::default();

    for batch in batches {
        let batch = batch?;
        set.stats.absorb(&batch);
        set.records.extend(batch.records);

        tracing::debug!(
            "Article {}: {} records so far",
            set.stats.articles,
            set.records.len()
        );

        if set.records.len() > limit {
            set.stats.capped = true;
            tracing::info!(
                "Example limit {} exceeded after {} articles ({} records); stopping",
                limit,
                set.stats.articles,
                set.records.len()
            );
            break;
        }
    }

    Ok(set)
}
