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

//! In-memory entry store for tests and development.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use strand_core::{Criteria, StringEntry};

use crate::{EntryStore, StoreError};

/// Entries keyed by digest in a lock-guarded map.
///
/// The duplicate check and the insert happen under one write lock, which is
/// what makes `create` atomic for concurrent callers.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, StringEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryStore {
    fn create(&self, entry: StringEntry) -> Result<StringEntry, StoreError> {
        let mut entries = self.entries.write();
        if entries.contains_key(&entry.digest) {
            return Err(StoreError::Duplicate(entry.digest));
        }
        entries.insert(entry.digest.clone(), entry.clone());
        Ok(entry)
    }

    fn get_by_digest(&self, digest: &str) -> Result<Option<StringEntry>, StoreError> {
        Ok(self.entries.read().get(digest).cloned())
    }

    fn find(&self, criteria: &Criteria) -> Result<Vec<StringEntry>, StoreError> {
        Ok(self
            .entries
            .read()
            .values()
            .filter(|entry| criteria.matches(&entry.properties))
            .cloned()
            .collect())
    }

    fn delete(&self, digest: &str) -> Result<bool, StoreError> {
        Ok(self.entries.write().remove(digest).is_some())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.entries.read().len())
    }
}
