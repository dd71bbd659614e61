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

//! VODB Engine - graph changelog engine for the visual object debugger
//!
//! Given successive snapshots of a debuggee's variable graph, the engine
//! computes minimal invertible diffs, keeps them in an append-only history,
//! and lets a panel scrub backwards and forwards through that history while
//! new live snapshots keep arriving.
//!
//! # Main Components
//!
//! - [`diff_snapshots`] - Computes a [`ChangelogEntry`] between two snapshots
//! - [`Changelog`] - Append-only history with a navigation [`Cursor`]
//! - [`project_snapshot`] / [`project_entry`] - Renderer-facing projections
//! - [`PanelSession`] - Per-panel state machine answering every event with a [`PanelCommand`]
//! - [`RenderedGraph`] - Replica of the renderer's graph built from emitted commands
//! - [`export_snapshot`] - GraphViz and PlantUML text exports
//! - [`EngineConfig`] - Engine configuration and settings

/// Engine configuration loaded from TOML
pub mod config;
/// Snapshot diffing
pub mod diff;
/// Changelog entries and inversion
pub mod entry;
/// Text exports
pub mod export;
/// Changelog history and cursor
pub mod history;
/// Replica of the renderer's graph
pub mod mirror;
/// Renderer-facing projections
pub mod projector;
/// Per-panel session state machine
pub mod session;

pub use config::*;
pub use diff::*;
pub use entry::*;
pub use export::*;
pub use history::*;
pub use mirror::*;
pub use projector::*;
pub use session::*;
