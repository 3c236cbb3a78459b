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

//! Strand Core
//!
//! Fundamental data structures and pure computation for the string analysis
//! engine: the property analyzer, the entry record, the filter criteria
//! model, and the shared error taxonomy.

pub mod analyzer;
pub mod criteria;
pub mod entry;
pub mod error;

pub use analyzer::{analyze, content_digest, StringProperties};
pub use criteria::Criteria;
pub use entry::StringEntry;
pub use error::{Result, StrandError};
