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

//! Error taxonomy shared across the workspace.
//!
//! Client-caused failures are split into distinct variants so the HTTP layer
//! can map each to its own status code. `ConflictingFilters` is deliberately
//! separate from `Parse`: "we understood the query but it contradicts itself"
//! is a different answer than "we never understood the query".

use thiserror::Error;

/// Errors surfaced by the analysis, query, and lifecycle operations.
#[derive(Debug, Error)]
pub enum StrandError {
    /// Malformed input: empty string, unparseable numeric parameter,
    /// out-of-range bounds. Never retried.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An entry with the same value already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Lookup or delete of an absent entry.
    #[error("not found: {0}")]
    NotFound(String),

    /// A free-text query matched no usable pattern.
    #[error("unable to parse natural language query: {0}")]
    Parse(String),

    /// A free-text query parsed but the extracted filters contradict each
    /// other.
    #[error("query parsed but resulted in conflicting filters: {0}")]
    ConflictingFilters(String),

    /// Storage or serialization failure; logged, surfaced generically.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StrandError>;
