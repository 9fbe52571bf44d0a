// ============================================================
// Layer 3 — OutputRecord Domain Type
// ============================================================
// One flattened training example per (question, answer candidate).
//
// The answer is a SPAN of word tokens in the context:
//   Context: "The quick fox ."   (tokens 0..=3)
//   Answer:  "quick"             → s_idx = 1, e_idx = 1
//
// Impossible questions point at a synthetic position one past
// the last context token (s_idx == e_idx == len(tokens)), while
// augmented_s_idx / augmented_e_idx keep the real location of
// the plausible answer so it can still be used as a signal.
//
// Field order matters: it is the key order of every JSON line.
//
// Reference: Rajpurkar et al. (2018) - SQuAD 2.0
//            Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// One line of the emitted `.jsonl` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub id:       String,
    pub context:  String,
    pub question: String,

    /// Answer text, or "" when the question is impossible
    pub answer: String,

    /// 1 for unanswerable questions, 0 otherwise
    pub is_impossible: u8,

    /// First answer token (inclusive)
    pub s_idx: usize,

    /// Last answer token (inclusive)
    pub e_idx: usize,

    /// Token span of the raw character span, before the
    /// impossible-question collapse is applied
    pub augmented_s_idx: usize,
    pub augmented_e_idx: usize,
}

impl OutputRecord {
    pub fn impossible(&self) -> bool {
        self.is_impossible == 1
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> OutputRecord {
        OutputRecord {
            id:              "q".to_string(),
            context:         "ctx".to_string(),
            question:        "?".to_string(),
            answer:          "a".to_string(),
            is_impossible:   0,
            s_idx:           2,
            e_idx:           4,
            augmented_s_idx: 2,
            augmented_e_idx: 4,
        }
    }

    #[test]
    fn test_impossible_flag() {
        assert!(!record().impossible());
        assert!(OutputRecord { is_impossible: 1, ..record() }.impossible());
    }

    #[test]
    fn test_serialises_fields_in_declared_order() {
        let json = serde_json::to_string(&record()).unwrap();
        let keys = [
            "\"id\"", "\"context\"", "\"question\"", "\"answer\"", "\"is_impossible\"",
            "\"s_idx\"", "\"e_idx\"", "\"augmented_s_idx\"", "\"augmented_e_idx\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }
}
