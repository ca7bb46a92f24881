//! Answer matching for drill turns.

use crate::types::MatchingMode;

/// Default similarity needed for a fuzzy match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Decides whether a typed answer is one of the accepted answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    pub mode: MatchingMode,
    pub fuzzy_threshold: f64,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            mode: MatchingMode::Exact,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl Matcher {
    pub fn new(mode: MatchingMode, fuzzy_threshold: f64) -> Self {
        Self {
            mode,
            fuzzy_threshold,
        }
    }

    /// Whether `typed` matches any of `accepted`.
    pub fn is_accepted<S: AsRef<str>>(&self, typed: &str, accepted: &[S]) -> bool {
        accepted
            .iter()
            .any(|correct| self.matches(typed, correct.as_ref()))
    }

    /// Compare a typed answer to a single correct answer.
    pub fn matches(&self, typed: &str, correct: &str) -> bool {
        match self.mode {
            MatchingMode::Exact => typed == correct,
            MatchingMode::CaseInsensitive => {
                normalize_whitespace(typed).to_lowercase()
                    == normalize_whitespace(correct).to_lowercase()
            }
            MatchingMode::Fuzzy => {
                let similarity = normalized_similarity(
                    &normalize_whitespace(typed).to_lowercase(),
                    &normalize_whitespace(correct).to_lowercase(),
                );
                similarity >= self.fuzzy_threshold
            }
        }
    }
}

/// A typed answer with outer spaces dropped and inner runs of spaces read as one,
/// so "  na  razie " checks like "na razie".
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The first `letters` characters of `answer`, used as a hint.
pub fn reveal_prefix(answer: &str, letters: usize) -> String {
    answer.chars().take(letters).collect()
}

/// Single-letter edits separating a typed answer from a correct one. Polish
/// diacritics count as one letter each.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// How close a typed answer is to a correct one: 1.0 for identical text, 0.0
/// when no letter lines up. Fuzzy matching compares it to its threshold.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}
