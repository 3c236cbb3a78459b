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

//! Durable entry store backed by a JSON snapshot file.
//!
//! The whole map is hydrated into memory on open and rewritten after each
//! mutation. Writes go to a temporary sibling file first and are renamed into
//! place, so the snapshot on disk is always either the old state or the new
//! one, never a torn write.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info};

use strand_core::{Criteria, StringEntry};

use crate::{EntryStore, StoreError};

/// JSON-snapshot entry store; the production backend.
pub struct FileStore {
    entries: RwLock<BTreeMap<String, StringEntry>>,
    path: PathBuf,
}

impl FileStore {
    /// Open (or create) the store at `path`.
    ///
    /// A missing file is an empty store; a present file must deserialize or
    /// the open fails. The snapshot is the system of record, so a corrupt
    /// file refuses to load rather than being silently replaced.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let file = File::open(&path)?;
            let map: BTreeMap<String, StringEntry> = serde_json::from_reader(BufReader::new(file))?;
            info!(entries = map.len(), path = %path.display(), "loaded entry snapshot");
            map
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            path,
        })
    }

    /// Rewrite the snapshot. Called with the write lock held so concurrent
    /// mutations serialize their disk writes in map-update order.
    fn persist(&self, entries: &BTreeMap<String, StringEntry>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(entries = entries.len(), "persisted entry snapshot");
        Ok(())
    }
}

impl EntryStore for FileStore {
    fn create(&self, entry: StringEntry) -> Result<StringEntry, StoreError> {
        let mut entries = self.entries.write();
        if entries.contains_key(&entry.digest) {
            return Err(StoreError::Duplicate(entry.digest));
        }
        entries.insert(entry.digest.clone(), entry.clone());
        self.persist(&entries)?;
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
        let mut entries = self.entries.write();
        if entries.remove(digest).is_none() {
            return Ok(false);
        }
        self.persist(&entries)?;
        Ok(true)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.entries.read().len())
    }
}
