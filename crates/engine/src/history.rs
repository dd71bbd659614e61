// VODB - Visual Object Debugger
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
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

//! Append-only changelog with a navigation cursor
//!
//! The [`Changelog`] keeps every non-empty diff the panel has shown, in
//! order, and tracks which historical state is currently on screen. Stepping
//! back yields the inversion of the entry being undone; stepping forward
//! yields the entry itself.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ChangelogEntry;

/// Position of the panel within its history.
///
/// Serialized as an integer for the renderer: `-1` for [`Cursor::Live`],
/// otherwise the history index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Cursor {
    /// Showing the most recent snapshot
    #[default]
    Live,
    /// Showing the state reached by undoing every entry from this index on.
    ///
    /// The index may equal the changelog length after stepping forward past
    /// the last entry, which displays the live state again.
    History(usize),
}

impl From<Cursor> for i64 {
    fn from(cursor: Cursor) -> Self {
        match cursor {
            Cursor::Live => -1,
            Cursor::History(index) => index as Self,
        }
    }
}

impl TryFrom<i64> for Cursor {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Live),
            index => usize::try_from(index)
                .map(Self::History)
                .map_err(|_| format!("invalid cursor position {index}")),
        }
    }
}

/// Ordered history of non-empty changelog entries plus a cursor
#[derive(Debug, Clone, Default)]
pub struct Changelog {
    entries: VecDeque<ChangelogEntry>,
    cursor: Cursor,
    /// Oldest entries are evicted once this many are stored
    max_len: Option<usize>,
}

impl Changelog {
    /// Create an empty, unbounded changelog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty changelog keeping at most `max_len` entries
    pub fn with_max_len(max_len: Option<usize>) -> Self {
        Self { max_len, ..Self::default() }
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor position
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the panel currently shows a past state rather than live
    pub fn is_browsing(&self) -> bool {
        matches!(self.cursor, Cursor::History(index) if index < self.entries.len())
    }

    /// Record a new entry and jump back to live.
    ///
    /// Empty entries are ignored and leave the cursor untouched; the return
    /// value says whether the entry was stored.
    pub fn push(&mut self, entry: ChangelogEntry) -> bool {
        if entry.is_empty() {
            return false;
        }

        self.entries.push_back(entry);
        self.cursor = Cursor::Live;

        if let Some(max_len) = self.max_len {
            while self.entries.len() > max_len {
                self.entries.pop_front();
                debug!(max_len, "Evicted oldest changelog entry");
            }
        }
        true
    }

    /// Advance one entry towards live, returning the entry to apply forward
    pub fn step_forward(&mut self) -> Option<&ChangelogEntry> {
        let index = match self.cursor {
            Cursor::Live => return None,
            Cursor::History(index) if index >= self.entries.len() => return None,
            Cursor::History(index) => index,
        };

        self.cursor = Cursor::History(index + 1);
        self.entries.get(index)
    }

    /// Move one entry into the past, returning the inverted entry to apply
    pub fn step_back(&mut self) -> Option<ChangelogEntry> {
        let index = match self.cursor {
            _ if self.entries.is_empty() => return None,
            Cursor::History(0) => return None,
            Cursor::Live => self.entries.len() - 1,
            Cursor::History(index) => index - 1,
        };

        self.cursor = Cursor::History(index);
        self.entries.get(index).map(ChangelogEntry::invert)
    }
}
