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

//! Diff command - print the changelog entry between two snapshots

use std::path::Path;

use eyre::Result;
use tracing::info;
use vodb_engine::diff_snapshots;

use super::read_snapshot;

/// Diff the snapshots stored in `old` and `new` and print the entry as JSON
pub fn diff_files(old: &Path, new: &Path) -> Result<()> {
    let old = read_snapshot(old)?;
    let new = read_snapshot(new)?;

    let entry = diff_snapshots(&old, &new);
    info!(
        node_changes = entry.node_changes.len(),
        edge_changes = entry.edge_changes.len(),
        "Computed changelog entry"
    );

    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}
