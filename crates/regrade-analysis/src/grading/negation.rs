//! Negation phrases that suppress a forbidden term appearing shortly after them.

use regrade_core::constants::NEGATION_LOOKBACK_TOKENS;
use regrade_core::errors::GradingError;

/// Configured negation phrases, pre-tokenized and lower-cased.
#[derive(Debug, Clone, Default)]
pub struct NegationMatcher {
    sequences: Vec<Vec<String>>,
}

impl NegationMatcher {
    /// Tokenize each phrase on whitespace. Blank phrases are rejected.
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Result<Self, GradingError> {
        let mut sequences = Vec::with_capacity(phrases.len());
        for (index, phrase) in phrases.iter().enumerate() {
            let words: Vec<String> = phrase
                .as_ref()
                .split_whitespace()
                .map(str::to_lowercase)
                .collect();
            if words.is_empty() {
                return Err(GradingError::BlankTerm {
                    kind: "negation",
                    index,
                });
            }
            sequences.push(words);
        }
        Ok(Self { sequences })
    }

    /// A matcher that never suppresses anything.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Look for a negation phrase ending at or before `token_index`, starting
    /// no earlier than `NEGATION_LOOKBACK_TOKENS` tokens back.
    ///
    /// Phrases are tried in configured order; each phrase is tried at its
    /// latest possible start first. Returns the matched tokens space-joined.
    pub fn find(&self, tokens: &[String], token_index: usize) -> Option<String> {
        let floor = token_index.saturating_sub(NEGATION_LOOKBACK_TOKENS);
        for sequence in &self.sequences {
            let Some(last_start) = token_index.checked_sub(sequence.len()) else {
                continue;
            };
            for start in (floor..=last_start).rev() {
                let segment = &tokens[start..start + sequence.len()];
                if segment == sequence.as_slice() {
                    return Some(segment.join(" "));
                }
            }
        }
        None
    }
}
