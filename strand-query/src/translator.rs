// Copyright 2025 Strand Contributors (https://github.com/strandhq/strand)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Natural language query translator.
//!
//! Converts a free-text query into a [`Criteria`] plus an [`InterpretedQuery`]
//! trace of which patterns fired. Matching is purely deterministic: an
//! ordered set of token and regex rules, no fuzzy or semantic understanding.
//!
//! ## Example queries
//!
//! - "find palindromic single word strings longer than 3 characters"
//! - "strings containing the letter z"
//! - "containing the first vowel"
//!
//! Rules are independent and do not short-circuit one another; several rules
//! may fire on the same query and compose into one criteria set. When two
//! rules target the same field, the later rule wins: a pattern-priority
//! choice, not an error.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use strand_core::{Criteria, Result, StrandError};

/// Read-only trace of a translation, returned to callers for transparency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretedQuery {
    /// The query text exactly as submitted.
    pub original: String,
    /// Criterion name → the value each fired rule extracted (final values
    /// after priority resolution).
    pub parsed_filters: BTreeMap<String, Value>,
}

/// Deterministic pattern-rule translator.
pub struct QueryTranslator {
    longer_than: Regex,
    contains_letter: Regex,
}

impl QueryTranslator {
    pub fn new() -> Self {
        Self {
            longer_than: Regex::new(r"longer than (\d+) characters?").unwrap(),
            contains_letter: Regex::new(r"contain(?:ing)? the letter ([a-z])").unwrap(),
        }
    }

    /// Translate a free-text query into filter criteria.
    ///
    /// The input is lower-cased and trimmed, then tokenized on whitespace.
    /// A query matching no rule at all yields an `Ok` all-absent criteria set
    /// (the caller decides whether that is acceptable); contradictory rule
    /// output is a [`StrandError::ConflictingFilters`], distinct from a
    /// mid-parse failure which is a [`StrandError::Parse`].
    pub fn translate(&self, text: &str) -> Result<(Criteria, InterpretedQuery)> {
        let normalized = text.trim().to_lowercase();
        let tokens: Vec<&str> = normalized.split_whitespace().collect();

        let mut criteria = Criteria::default();
        let mut parsed_filters = BTreeMap::new();

        // Rule 1: exact phrase "single word" -> word_count = 1
        if contains_phrase(&tokens, &["single", "word"]) {
            criteria.word_count = Some(1);
            parsed_filters.insert("word_count".to_string(), json!(1));
        }

        // Rule 2: token "palindromic" anywhere -> is_palindrome = true
        if contains_token(&tokens, "palindromic") {
            criteria.is_palindrome = Some(true);
            parsed_filters.insert("is_palindrome".to_string(), json!(true));
        }

        // Rule 3: "longer than N characters" -> min_length = N + 1
        // (strictly-greater-than expressed as an inclusive lower bound)
        if let Some(caps) = self.longer_than.captures(&normalized) {
            let stated: u64 = caps[1]
                .parse()
                .map_err(|_| StrandError::Parse(format!("length out of range: {}", &caps[1])))?;
            let min_length = stated
                .checked_add(1)
                .ok_or_else(|| StrandError::Parse(format!("length out of range: {stated}")))?;
            criteria.min_length = Some(min_length);
            parsed_filters.insert("min_length".to_string(), json!(min_length));
        }

        // Rule 4: "contain the letter X" / "containing the letter X"
        if let Some(caps) = self.contains_letter.captures(&normalized) {
            // the capture group is a single [a-z]
            if let Some(letter) = caps[1].chars().next() {
                criteria.contains_character = Some(letter);
                parsed_filters.insert("contains_character".to_string(), json!(letter.to_string()));
            }
        }

        // Rule 5: phrase "first vowel" plus standalone token "containing"
        // -> contains_character = 'a'. The translator does not enumerate
        // vowels; the constant is fixed. Later than rule 4, so it wins the
        // field when both fire.
        if contains_phrase(&tokens, &["first", "vowel"]) && contains_token(&tokens, "containing") {
            criteria.contains_character = Some('a');
            parsed_filters.insert("contains_character".to_string(), json!("a"));
        }

        criteria
            .validate()
            .map_err(|err| StrandError::ConflictingFilters(err.to_string()))?;

        debug!(query = %text, fields = parsed_filters.len(), "translated natural language query");

        Ok((
            criteria,
            InterpretedQuery {
                original: text.to_string(),
                parsed_filters,
            },
        ))
    }
}

impl Default for QueryTranslator {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_token(tokens: &[&str], target: &str) -> bool {
    tokens.iter().any(|&token| token == target)
}

/// True when `phrase` occurs as adjacent tokens, in order.
fn contains_phrase(tokens: &[&str], phrase: &[&str]) -> bool {
    if phrase.is_empty() || tokens.len() < phrase.len() {
        return false;
    }
    tokens.windows(phrase.len()).any(|window| window == phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_query_sets_three_fields() {
        let translator = QueryTranslator::new();
        let (criteria, interpreted) = translator
            .translate("find palindromic single word strings longer than 3 characters")
            .unwrap();

        assert_eq!(criteria.is_palindrome, Some(true));
        assert_eq!(criteria.word_count, Some(1));
        assert_eq!(criteria.min_length, Some(4));
        assert_eq!(criteria.contains_character, None);
        assert_eq!(interpreted.parsed_filters.len(), 3);
        assert_eq!(interpreted.parsed_filters["min_length"], json!(4));
        assert_eq!(interpreted.parsed_filters["word_count"], json!(1));
        assert_eq!(interpreted.parsed_filters["is_palindrome"], json!(true));
    }

    #[test]
    fn first_vowel_is_a_fixed_constant() {
        let translator = QueryTranslator::new();
        let (criteria, interpreted) = translator
            .translate("containing the first vowel")
            .unwrap();

        assert_eq!(criteria.contains_character, Some('a'));
        assert_eq!(interpreted.parsed_filters.len(), 1);
        assert_eq!(interpreted.parsed_filters["contains_character"], json!("a"));
    }

    #[test]
    fn first_vowel_requires_the_containing_token() {
        let translator = QueryTranslator::new();
        let (criteria, _) = translator.translate("the first vowel").unwrap();
        assert_eq!(criteria.contains_character, None);
    }

    #[test]
    fn later_rule_wins_a_shared_field() {
        let translator = QueryTranslator::new();
        // rule 4 extracts 'z', rule 5 then overwrites with 'a'
        let (criteria, interpreted) = translator
            .translate("containing the letter z and the first vowel")
            .unwrap();

        assert_eq!(criteria.contains_character, Some('a'));
        assert_eq!(interpreted.parsed_filters["contains_character"], json!("a"));
    }

    #[test]
    fn contain_and_containing_both_match() {
        let translator = QueryTranslator::new();
        let (criteria, _) = translator
            .translate("strings that contain the letter q")
            .unwrap();
        assert_eq!(criteria.contains_character, Some('q'));

        let (criteria, _) = translator
            .translate("strings containing the letter q")
            .unwrap();
        assert_eq!(criteria.contains_character, Some('q'));
    }

    #[test]
    fn longer_than_uses_strictly_greater_semantics() {
        let translator = QueryTranslator::new();
        let (criteria, _) = translator
            .translate("strings longer than 10 characters")
            .unwrap();
        assert_eq!(criteria.min_length, Some(11));

        // singular "character" is accepted too
        let (criteria, _) = translator
            .translate("longer than 0 character")
            .unwrap();
        assert_eq!(criteria.min_length, Some(1));
    }

    #[test]
    fn single_word_must_be_adjacent_and_ordered() {
        let translator = QueryTranslator::new();
        let (criteria, _) = translator.translate("a single word please").unwrap();
        assert_eq!(criteria.word_count, Some(1));

        let (criteria, _) = translator.translate("word single").unwrap();
        assert_eq!(criteria.word_count, None);

        let (criteria, _) = translator.translate("single spaced word").unwrap();
        assert_eq!(criteria.word_count, None);
    }

    #[test]
    fn input_is_case_insensitive_and_trimmed() {
        let translator = QueryTranslator::new();
        let (criteria, interpreted) = translator
            .translate("  PALINDROMIC Single Word  ")
            .unwrap();
        assert_eq!(criteria.is_palindrome, Some(true));
        assert_eq!(criteria.word_count, Some(1));
        // the trace keeps the original text untouched
        assert_eq!(interpreted.original, "  PALINDROMIC Single Word  ");
    }

    #[test]
    fn unmatched_query_yields_empty_criteria_not_an_error() {
        let translator = QueryTranslator::new();
        let (criteria, interpreted) = translator.translate("show me everything").unwrap();
        assert!(criteria.is_empty());
        assert!(interpreted.parsed_filters.is_empty());
    }

    #[test]
    fn absurd_length_is_a_parse_error() {
        let translator = QueryTranslator::new();
        let err = translator
            .translate("longer than 99999999999999999999999999 characters")
            .unwrap_err();
        assert!(matches!(err, StrandError::Parse(_)));
    }
}
