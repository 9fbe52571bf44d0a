// ============================================================
// Layer 3 — Input Document Types
// ============================================================
// The raw dataset file is a nested JSON structure:
//
//   { "data": [                        ← articles
//       { "paragraphs": [              ← paragraphs
//           { "context": "...",
//             "qas": [                 ← QA entries
//               { "id": "...", "question": "...",
//                 "is_impossible": false,
//                 "answers": [ { "text": "...", "answer_start": 12 } ],
//                 "plausible_answers": [ ... ] } ] } ] } ] }
//
// Missing keys or wrong types are a hard error: serde rejects
// the whole document and the run aborts.
//
// Reference: Rust Book §5 (Structs)
//            serde derive documentation

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// The whole dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadDocument {
    /// Ordered sequence of articles
    pub data: Vec<Article>,
}

/// One article (usually one Wikipedia page).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub paragraphs: Vec<Paragraph>,
}

/// A context passage and every question asked about it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Raw context text; answer offsets index into this string
    pub context: String,
    pub qas: Vec<QaEntry>,
}

/// A single question with its answer candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaEntry {
    pub id: String,
    pub question: String,
    pub is_impossible: bool,

    /// Gold answers, read when the question is answerable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<AnswerCandidate>>,

    /// Plausible-but-wrong answers, read when the question is impossible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plausible_answers: Option<Vec<AnswerCandidate>>,
}

impl QaEntry {
    /// Pick the candidate set that matches `is_impossible`.
    ///
    /// Impossible questions read `plausible_answers`,
    /// answerable ones read `answers`. The field that is
    /// required but absent makes the document malformed.
    pub fn candidates(&self) -> Result<&[AnswerCandidate]> {
        let (field, set) = if self.is_impossible {
            ("plausible_answers", &self.plausible_answers)
        } else {
            ("answers", &self.answers)
        };

        match set {
            Some(candidates) => Ok(candidates.as_slice()),
            None => bail!("QA entry '{}' is missing required field '{}'", self.id, field),
        }
    }
}

/// An answer substring and where it starts in the context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCandidate {
    pub text: String,

    /// 0-based character (not byte) offset into the context
    pub answer_start: usize,
}

impl AnswerCandidate {
    #[cfg(test)]
    pub fn new(text: impl Into<String>, answer_start: usize) -> Self {
        Self { text: text.into(), answer_start }
    }

    /// Raw character offset one past the end of the answer
    pub fn answer_end(&self) -> usize {
        self.answer_start + self.text.chars().count()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(is_impossible: bool) -> QaEntry {
        QaEntry {
            id:                "q1".to_string(),
            question:          "Who?".to_string(),
            is_impossible,
            answers:           Some(vec![AnswerCandidate::new("gold", 0)]),
            plausible_answers: Some(vec![AnswerCandidate::new("plausible", 5)]),
        }
    }

    #[test]
    fn test_possible_question_reads_answers() {
        let qa = entry(false);
        assert_eq!(qa.candidates().unwrap()[0].text, "gold");
    }

    #[test]
    fn test_impossible_question_reads_plausible_answers() {
        let qa = entry(true);
        assert_eq!(qa.candidates().unwrap()[0].text, "plausible");
    }

    #[test]
    fn test_missing_candidate_field_is_an_error() {
        let mut qa = entry(true);
        qa.plausible_answers = None;
        let err = qa.candidates().unwrap_err().to_string();
        assert!(err.contains("plausible_answers"));
        assert!(err.contains("q1"));
    }

    #[test]
    fn test_answer_end_counts_chars_not_bytes() {
        // "café" is 4 chars but 5 bytes
        let a = AnswerCandidate::new("café", 10);
        assert_eq!(a.answer_end(), 14);
    }

    #[test]
    fn test_missing_is_impossible_fails_to_parse() {
        let raw = r#"{"id": "x", "question": "q", "answers": []}"#;
        assert!(serde_json::from_str::<QaEntry>(raw).is_err());
    }

    #[test]
    fn test_parses_squad_v2_shape() {
        let raw = r#"{
            "data": [{
                "title": "ignored",
                "paragraphs": [{
                    "context": "The quick fox.",
                    "qas": [{
                        "id": "a1",
                        "question": "Which fox?",
                        "is_impossible": false,
                        "answers": [{"text": "quick", "answer_start": 4}]
                    }]
                }]
            }]
        }"#;
        let doc: SquadDocument = serde_json::from_str(raw).unwrap();
        let qa = &doc.data[0].paragraphs[0].qas[0];
        assert_eq!(qa.candidates().unwrap(), &[AnswerCandidate::new("quick", 4)]);
    }
}
