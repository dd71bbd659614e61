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

//! Export command

use std::path::Path;

use eyre::Result;
use tracing::info;
use vodb_engine::{export_snapshot, ExportFormat};

use super::read_snapshot;

/// Render the snapshot stored in `path` in the given format
pub fn export_file(path: &Path, format: ExportFormat) -> Result<()> {
    let snapshot = read_snapshot(path)?;
    info!(variables = snapshot.len(), ?format, "Exporting snapshot");

    print!("{}", export_snapshot(&snapshot, format));
    Ok(())
}
