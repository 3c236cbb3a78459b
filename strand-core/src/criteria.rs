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

//! Filter criteria over stored entries.
//!
//! A [`Criteria`] is a flat conjunction of optional predicates: every present
//! field must hold, absent fields impose no constraint. There is no nested
//! boolean logic and no relevance scoring; an entry either matches or it
//! does not.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analyzer::StringProperties;
use crate::error::{Result, StrandError};

/// Optional filter predicates, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl Criteria {
    /// True when no field is set; such criteria match every entry.
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Reject self-contradictory bounds.
    ///
    /// Runs before any store lookup; an invalid criteria set never reaches
    /// evaluation.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(StrandError::Validation(format!(
                    "min_length ({min}) cannot be greater than max_length ({max})"
                )));
            }
        }
        Ok(())
    }

    /// Evaluate the conjunction against one entry's properties.
    ///
    /// Fields are checked in the fixed order: is_palindrome, min_length,
    /// max_length, word_count, contains_character.
    pub fn matches(&self, props: &StringProperties) -> bool {
        if let Some(want) = self.is_palindrome {
            if props.is_palindrome != want {
                return false;
            }
        }
        if let Some(min) = self.min_length {
            if props.length < min {
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if props.length > max {
                return false;
            }
        }
        if let Some(count) = self.word_count {
            if props.word_count != count {
                return false;
            }
        }
        if let Some(ch) = self.contains_character {
            // Same lowercase normalization the frequency map was built with.
            let key: String = ch.to_lowercase().collect();
            if !props
                .character_frequency_map
                .get(&key)
                .is_some_and(|&n| n > 0)
            {
                return false;
            }
        }
        true
    }

    /// Render only the fields that are actually set, in evaluation order.
    ///
    /// Zero-valued defaults are never emitted: an absent field is absent from
    /// the output mapping too.
    pub fn applied_filters(&self) -> serde_json::Map<String, Value> {
        let fields: [(&str, Option<Value>); 5] = [
            ("is_palindrome", self.is_palindrome.map(Value::from)),
            ("min_length", self.min_length.map(Value::from)),
            ("max_length", self.max_length.map(Value::from)),
            ("word_count", self.word_count.map(Value::from)),
            (
                "contains_character",
                self.contains_character.map(|c| Value::from(c.to_string())),
            ),
        ];
        let mut map = serde_json::Map::new();
        for (name, value) in fields {
            if let Some(value) = value {
                map.insert(name.to_string(), value);
            }
        }
        map
    }
}
