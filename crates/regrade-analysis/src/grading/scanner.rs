//! Finds forbidden terms in one inspection narrative and classifies each
//! occurrence as active or negated.
//!
//! All patterns are compiled once in `TextScanner::new` and only read after
//! that, so a scanner can be shared across threads.

use regex::{Regex, RegexBuilder};

use regrade_core::constants::CONTEXT_RADIUS_CHARS;
use regrade_core::errors::GradingError;

use super::negation::NegationMatcher;
use super::types::{ForbiddenHit, NegatedHit};

/// A forbidden term and its whole-word, case-insensitive pattern.
#[derive(Debug, Clone)]
struct CompiledTerm {
    term: String,
    pattern: Regex,
}

/// Hits found in a single piece of text, in term order then position order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub forbidden: Vec<ForbiddenHit>,
    pub negated: Vec<NegatedHit>,
}

impl ScanOutcome {
    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty() && self.negated.is_empty()
    }

    pub fn has_forbidden(&self) -> bool {
        !self.forbidden.is_empty()
    }
}

/// Word tokens of a text: lower-cased words and their byte offsets.
struct Tokens {
    words: Vec<String>,
    starts: Vec<usize>,
}

impl Tokens {
    /// Index of the first token starting inside `[start, end)`.
    fn index_within(&self, start: usize, end: usize) -> Option<usize> {
        let idx = self.starts.partition_point(|&pos| pos < start);
        (idx < self.starts.len() && self.starts[idx] < end).then_some(idx)
    }
}

#[derive(Debug, Clone)]
pub struct TextScanner {
    terms: Vec<CompiledTerm>,
    word_pattern: Regex,
    negations: NegationMatcher,
}

impl TextScanner {
    /// Compile the forbidden terms and tokenize the negation phrases.
    ///
    /// Fails if `forbidden_terms` is empty or contains a blank entry.
    /// An empty `negation_terms` disables negation suppression.
    pub fn new<F, N>(forbidden_terms: &[F], negation_terms: &[N]) -> Result<Self, GradingError>
    where
        F: AsRef<str>,
        N: AsRef<str>,
    {
        if forbidden_terms.is_empty() {
            return Err(GradingError::EmptyForbiddenTerms);
        }

        let mut terms = Vec::with_capacity(forbidden_terms.len());
        for (index, raw) in forbidden_terms.iter().enumerate() {
            let term = raw.as_ref().trim();
            if term.is_empty() {
                return Err(GradingError::BlankTerm {
                    kind: "forbidden",
                    index,
                });
            }
            let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", regex::escape(term)))
                .case_insensitive(true)
                .build()
                .map_err(|e| GradingError::PatternCompilation {
                    term: term.to_string(),
                    message: e.to_string(),
                })?;
            terms.push(CompiledTerm {
                term: term.to_string(),
                pattern,
            });
        }

        let word_pattern = Regex::new(r"\w+").map_err(|e| GradingError::PatternCompilation {
            term: r"\w+".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            terms,
            word_pattern,
            negations: NegationMatcher::new(negation_terms)?,
        })
    }

    /// Configured forbidden terms, trimmed, in configured order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.term.as_str())
    }

    pub fn negations(&self) -> &NegationMatcher {
        &self.negations
    }

    /// Scan `text`, attributing every hit to `year`.
    pub fn scan(&self, text: &str, year: i32) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        if text.trim().is_empty() {
            return outcome;
        }

        let tokens = self.tokenize(text);

        for compiled in &self.terms {
            for m in compiled.pattern.find_iter(text) {
                let Some(token_index) = tokens.index_within(m.start(), m.end()) else {
                    continue;
                };
                let term = m.as_str().to_string();
                let context = context_snippet(text, m.start(), m.end()).to_string();

                match self.negations.find(&tokens.words, token_index) {
                    Some(negation) => outcome.negated.push(NegatedHit {
                        year,
                        term,
                        negation,
                        context,
                    }),
                    None => outcome.forbidden.push(ForbiddenHit {
                        year,
                        term,
                        context,
                    }),
                }
            }
        }

        outcome
    }

    fn tokenize(&self, text: &str) -> Tokens {
        let mut words = Vec::new();
        let mut starts = Vec::new();
        for m in self.word_pattern.find_iter(text) {
            words.push(m.as_str().to_lowercase());
            starts.push(m.start());
        }
        Tokens { words, starts }
    }
}

/// Text from `CONTEXT_RADIUS_CHARS` characters before `start` to the same
/// number after `end`, clamped to the string and trimmed.
fn context_snippet(text: &str, start: usize, end: usize) -> &str {
    let begin = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_RADIUS_CHARS - 1)
        .map_or(0, |(i, _)| i);
    let finish = text[end..]
        .char_indices()
        .nth(CONTEXT_RADIUS_CHARS)
        .map_or(text.len(), |(i, _)| end + i);
    text[begin..finish].trim()
}
