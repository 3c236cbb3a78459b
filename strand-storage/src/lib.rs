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

//! Strand Storage
//!
//! Durable keyed storage for string entries behind the [`EntryStore`]
//! capability trait. Two backends: [`MemoryStore`] for tests and development,
//! [`FileStore`] for a durable JSON snapshot on disk.

pub mod file_store;
pub mod memory_store;

use thiserror::Error;

use strand_core::{content_digest, Criteria, StrandError, StringEntry};

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Storage-layer failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An entry with this digest (and therefore this value) already exists.
    #[error("duplicate entry for digest {0}")]
    Duplicate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for StrandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(digest) => {
                StrandError::Conflict(format!("string already exists (digest {digest})"))
            }
            other => StrandError::Internal(other.to_string()),
        }
    }
}

/// Capability interface over entry storage.
///
/// Every backend must make `create` atomic with respect to the duplicate
/// check: of two concurrent creates of the same value, exactly one wins and
/// the other observes [`StoreError::Duplicate`].
pub trait EntryStore: Send + Sync {
    /// Insert a new entry; fails with [`StoreError::Duplicate`] if the digest
    /// is already present.
    fn create(&self, entry: StringEntry) -> Result<StringEntry, StoreError>;

    fn get_by_digest(&self, digest: &str) -> Result<Option<StringEntry>, StoreError>;

    /// Look up by exact raw value.
    ///
    /// Entries are content-addressed, so this digests the value and hits the
    /// primary key; no secondary index is required.
    fn get_by_value(&self, value: &str) -> Result<Option<StringEntry>, StoreError> {
        self.get_by_digest(&content_digest(value))
    }

    /// All entries whose properties satisfy the (already validated) criteria.
    fn find(&self, criteria: &Criteria) -> Result<Vec<StringEntry>, StoreError>;

    /// Remove by digest; returns whether an entry was present.
    fn delete(&self, digest: &str) -> Result<bool, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;
}
