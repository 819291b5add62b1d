//! Fuzzy title scoring
//!
//! Scores fall into three bands so that the ordering guarantees hold no
//! matter what the fuzzy scorer returns:
//!
//! - `[3, 4)` query is a prefix of the candidate
//! - `[2, 3)` query appears elsewhere as a contiguous substring
//! - `(1, 2)` query characters appear in order but scattered
//! - `0` no match
//!
//! Inside a band, the fraction rewards a tighter fit (query covering more of
//! the candidate) and a higher nucleo score.
//!
//! Queries are literal text: `!`, `^`, `$` and `'` are ordinary characters,
//! not nucleo pattern operators. Whitespace separates words that must each
//! match.

use nucleo_matcher::chars;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

const PREFIX_BAND: f64 = 3.0;
const SUBSTRING_BAND: f64 = 2.0;
const FUZZY_BAND: f64 = 1.0;

/// Nucleo score at which the fuzzy component reaches half its weight
const NUCLEO_HALF_SCORE: f64 = 100.0;

/// Reusable scorer for one query.
///
/// Holds the parsed pattern and matcher buffers so scoring a whole catalog
/// allocates once per query rather than once per title.
pub struct FuzzyMatcher {
    query_folded: String,
    query_chars: usize,
    normalize: bool,
    pattern: Pattern,
    matcher: Matcher,
    buf: Vec<char>,
}

impl FuzzyMatcher {
    pub fn new(query: &str) -> Self {
        let query = query.trim();
        // same rule as Normalization::Smart: a query that spells out accents matches them exactly
        let normalize = query.chars().all(|c| chars::normalize(c) == c);
        Self {
            query_folded: fold(query, normalize),
            query_chars: query.chars().count(),
            normalize,
            pattern: Pattern::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            ),
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::with_capacity(64),
        }
    }

    /// Score `candidate` against this matcher's query. Never negative.
    pub fn score(&mut self, candidate: &str) -> f64 {
        if self.query_folded.is_empty() || candidate.is_empty() {
            return 0.0;
        }

        self.buf.clear();
        let haystack = Utf32Str::new(candidate, &mut self.buf);
        let Some(nucleo) = self.pattern.score(haystack, &mut self.matcher) else {
            return 0.0;
        };

        let candidate_folded = fold(candidate, self.normalize);
        let band = match candidate_folded.find(&self.query_folded) {
            Some(0) => PREFIX_BAND,
            Some(_) => SUBSTRING_BAND,
            None => FUZZY_BAND,
        };

        band + self.fraction(candidate, nucleo)
    }

    /// Strictly inside `(0, 1)`.
    fn fraction(&self, candidate: &str, nucleo: u32) -> f64 {
        let candidate_chars = candidate.chars().count().max(1);
        let coverage = (self.query_chars.min(candidate_chars) as f64) / candidate_chars as f64;
        let nucleo = nucleo as f64;
        let strength = nucleo / (nucleo + NUCLEO_HALF_SCORE);
        // coverage <= 1 and strength < 1, so the mean stays below 1
        (0.5 * coverage + 0.5 * strength).clamp(f64::MIN_POSITIVE, 0.999_999)
    }
}

/// Lowercase `text` char by char, stripping diacritics when `normalize` is set.
fn fold(text: &str, normalize: bool) -> String {
    text.chars()
        .map(|c| {
            let c = if normalize { chars::normalize(c) } else { c };
            chars::to_lower_case(c)
        })
        .collect()
}

/// One-shot scoring of `candidate` against `query`.
pub fn score(candidate: &str, query: &str) -> f64 {
    FuzzyMatcher::new(query).score(candidate)
}
