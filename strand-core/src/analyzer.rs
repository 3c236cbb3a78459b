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

//! String property analyzer.
//!
//! [`analyze`] is a total, pure function: every input string (including the
//! empty string) produces a full [`StringProperties`] without error, and there
//! is no shared state, so it is safe to call from any number of concurrent
//! request handlers.
//!
//! # Normalization
//!
//! Each property uses its own normalization of the input, and they are
//! intentionally not the same:
//!
//! - palindrome check: lowercase, literal spaces removed (tabs, punctuation,
//!   and other whitespace are kept)
//! - unique character count: the raw string, untouched
//! - frequency map: lowercase, leading/trailing whitespace trimmed
//! - digest: the raw bytes, untouched, so `"Foo"` and `"foo"` are distinct
//!   records

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The full set of properties derived from one string. Immutable once
/// computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Number of Unicode code points (not bytes).
    pub length: u64,
    /// True iff the string, lower-cased and with spaces removed, equals its
    /// own reversal code-point-by-code-point.
    pub is_palindrome: bool,
    /// Count of distinct code points in the raw string.
    pub unique_characters: u64,
    /// Whitespace-delimited token count.
    pub word_count: u64,
    /// Occurrence count per code point of the lower-cased, trimmed string.
    pub character_frequency_map: BTreeMap<String, u64>,
    /// Lowercase hex SHA-256 of the raw bytes; doubles as the storage key.
    pub sha256_hash: String,
}

/// Compute every derived property for `raw`.
pub fn analyze(raw: &str) -> StringProperties {
    StringProperties {
        length: raw.chars().count() as u64,
        is_palindrome: is_palindrome(raw),
        unique_characters: unique_character_count(raw) as u64,
        word_count: word_count(raw) as u64,
        character_frequency_map: character_frequency_map(raw),
        sha256_hash: content_digest(raw),
    }
}

/// Lowercase hex SHA-256 digest of the raw string bytes.
///
/// No normalization is applied: the digest identifies the exact submitted
/// value.
pub fn content_digest(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

fn is_palindrome(raw: &str) -> bool {
    let normalized: Vec<char> = raw.to_lowercase().chars().filter(|&c| c != ' ').collect();
    normalized.iter().eq(normalized.iter().rev())
}

fn unique_character_count(raw: &str) -> usize {
    raw.chars().collect::<HashSet<char>>().len()
}

fn word_count(raw: &str) -> usize {
    raw.split_whitespace().count()
}

fn character_frequency_map(raw: &str) -> BTreeMap<String, u64> {
    let mut map = BTreeMap::new();
    for ch in raw.to_lowercase().trim().chars() {
        *map.entry(ch.to_string()).or_insert(0) += 1;
    }
    map
}
