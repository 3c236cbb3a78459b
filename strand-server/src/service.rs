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

//! Entry lifecycle orchestration.
//!
//! Thin layer tying the analyzer, the translator, and the entry store
//! together. All real logic lives below; this layer owns the operation
//! contracts: duplicate creates are conflicts, absent lookups are not-found,
//! criteria are validated before any store access.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use strand_core::{content_digest, Criteria, Result, StrandError, StringEntry};
use strand_query::{InterpretedQuery, QueryTranslator};
use strand_storage::EntryStore;

/// Result of a filter operation: the matches plus the filters that were
/// literally applied (only fields that were actually set).
#[derive(Debug, Serialize)]
pub struct FilterOutcome {
    pub matches: Vec<StringEntry>,
    pub applied_filters: serde_json::Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreted_query: Option<InterpretedQuery>,
}

/// Orchestrates the five entry lifecycle operations over an [`EntryStore`].
pub struct StringService {
    store: Arc<dyn EntryStore>,
    translator: QueryTranslator,
}

impl StringService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            translator: QueryTranslator::new(),
        }
    }

    /// Analyze and store a new string.
    ///
    /// Properties are fully computed before the store is touched; the store's
    /// atomic create-if-absent decides the winner between concurrent creates
    /// of the same value.
    #[instrument(skip(self, value))]
    pub fn create_string(&self, value: &str) -> Result<StringEntry> {
        if value.is_empty() {
            return Err(StrandError::Validation(
                "value must not be empty".to_string(),
            ));
        }

        let entry = StringEntry::new(value);
        let stored = self.store.create(entry)?;
        debug!(digest = %stored.digest, length = stored.properties.length, "created string entry");
        Ok(stored)
    }

    pub fn get_by_value(&self, value: &str) -> Result<StringEntry> {
        self.store
            .get_by_value(value)?
            .ok_or_else(|| StrandError::NotFound("string does not exist".to_string()))
    }

    /// Validate criteria, then collect matching entries.
    ///
    /// Invalid criteria never reach the store.
    pub fn filter_by_criteria(&self, criteria: &Criteria) -> Result<FilterOutcome> {
        criteria.validate()?;
        let matches = self.store.find(criteria)?;
        Ok(FilterOutcome {
            matches,
            applied_filters: criteria.applied_filters(),
            interpreted_query: None,
        })
    }

    /// Translate a free-text query and run the same find path.
    ///
    /// A query no rule recognized is reported as a parse failure here, so the
    /// caller can tell it apart from a query that parsed into contradictory
    /// filters.
    #[instrument(skip(self, query))]
    pub fn filter_by_natural_language(&self, query: &str) -> Result<FilterOutcome> {
        let (criteria, interpreted) = self.translator.translate(query)?;
        if interpreted.parsed_filters.is_empty() {
            return Err(StrandError::Parse(
                "query matched no recognized patterns".to_string(),
            ));
        }

        let matches = self.store.find(&criteria)?;
        Ok(FilterOutcome {
            matches,
            applied_filters: criteria.applied_filters(),
            interpreted_query: Some(interpreted),
        })
    }

    pub fn delete_by_value(&self, value: &str) -> Result<()> {
        let digest = content_digest(value);
        if !self.store.delete(&digest)? {
            return Err(StrandError::NotFound("string does not exist".to_string()));
        }
        debug!(%digest, "deleted string entry");
        Ok(())
    }

    pub fn entry_count(&self) -> Result<usize> {
        Ok(self.store.count()?)
    }
}
