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

//! Command modules for the VODB CLI

use std::{fs, path::Path};

use eyre::{Result, WrapErr};
use vodb_common::VariableSnapshot;

pub mod diff;
pub mod export;
pub mod replay;
pub mod server;

pub use diff::diff_files;
pub use export::export_file;
pub use replay::replay_script;
pub use server::start_server;

/// Read a snapshot (a JSON list of variables) from `path`
pub fn read_snapshot(path: &Path) -> Result<VariableSnapshot> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("failed to parse snapshot {}", path.display()))
}
