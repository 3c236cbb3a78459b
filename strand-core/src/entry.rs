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

//! The persisted string entry record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzer::{analyze, StringProperties};

/// A stored string and its derived properties.
///
/// Entries are content-addressed: `digest` is the SHA-256 of `value`, so two
/// entries with equal values can never coexist. An entry is immutable after
/// creation; the only lifecycle transition is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringEntry {
    /// Primary key, equal to `properties.sha256_hash`.
    #[serde(rename = "id")]
    pub digest: String,
    /// The raw string exactly as submitted.
    pub value: String,
    pub properties: StringProperties,
    /// Set once at creation (UTC, ISO-8601 on the wire).
    pub created_at: DateTime<Utc>,
}

impl StringEntry {
    /// Analyze `value` and build the entry that would store it.
    ///
    /// Property computation completes before the caller attempts any store
    /// mutation, so a failed create leaves no partial state behind.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let properties = analyze(&value);
        Self {
            digest: properties.sha256_hash.clone(),
            value,
            properties,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_derived_from_value() {
        let entry = StringEntry::new("racecar");
        assert_eq!(entry.digest, entry.properties.sha256_hash);
        assert_eq!(entry.digest, crate::analyzer::content_digest("racecar"));
    }

    #[test]
    fn serializes_with_id_key_and_iso8601_timestamp() {
        let entry = StringEntry::new("abc");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("id").is_some());
        assert!(json.get("digest").is_none());
        let ts = json["created_at"].as_str().unwrap();
        assert!(ts.contains('T'));
    }
}
