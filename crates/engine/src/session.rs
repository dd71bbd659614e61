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

//! Per-panel session state machine
//!
//! A [`PanelSession`] is the single owner of one panel's held snapshot and
//! changelog. It starts empty, becomes live on the first snapshot, and goes
//! back to empty on teardown:
//!
//! ```text
//! Empty --submit--> Live(snapshot, changelog = [], cursor = live)
//! Live  --submit | step_forward | step_back--> Live
//! Live  --teardown--> Empty
//! ```
//!
//! Every operation is synchronous and answers with exactly one
//! [`PanelCommand`] for the renderer.

use tracing::{debug, info};
use vodb_common::VariableSnapshot;

use crate::{
    diff_snapshots, project_entry, project_snapshot, Changelog, Cursor, EngineConfig,
    PanelCommand,
};

#[derive(Debug, Clone, Default)]
enum PanelState {
    #[default]
    Empty,
    Live {
        snapshot: VariableSnapshot,
        changelog: Changelog,
    },
}

/// State of one open visualization panel
#[derive(Debug, Clone, Default)]
pub struct PanelSession {
    config: EngineConfig,
    state: PanelState,
}

impl PanelSession {
    /// Create an empty session using `config`
    pub fn new(config: EngineConfig) -> Self {
        Self { config, state: PanelState::Empty }
    }

    /// Handle a new snapshot from the debuggee.
    ///
    /// The first snapshot produces a full projection. Later ones are diffed
    /// against the held snapshot, which is always replaced. The diff is
    /// recorded and shown unless it is empty or the user is browsing history;
    /// in the latter case it is dropped so the past state on screen is never
    /// overwritten.
    pub fn submit_snapshot(&mut self, snapshot: VariableSnapshot) -> PanelCommand {
        match &mut self.state {
            PanelState::Empty => {
                info!(variables = snapshot.len(), "Initializing panel from first snapshot");
                let data = project_snapshot(&snapshot);
                self.state = PanelState::Live {
                    snapshot,
                    changelog: Changelog::with_max_len(self.config.max_history),
                };
                PanelCommand::Initialize { data, options: self.config.render.clone() }
            }
            PanelState::Live { snapshot: held, changelog } => {
                let entry = diff_snapshots(held, &snapshot);
                *held = snapshot;

                if entry.is_empty() {
                    debug!("Snapshot unchanged");
                    return PanelCommand::Noop;
                }

                if changelog.is_browsing() {
                    debug!(
                        cursor = ?changelog.cursor(),
                        changes = entry.len(),
                        "Dropping live changes while browsing history"
                    );
                    return PanelCommand::Noop;
                }

                let data = project_entry(&entry);
                debug!(
                    nodes = entry.node_changes.len(),
                    edges = entry.edge_changes.len(),
                    history = changelog.len() + 1,
                    "Recording changelog entry"
                );
                changelog.push(entry);
                PanelCommand::Update { data }
            }
        }
    }

    /// Redo the next recorded entry
    pub fn step_forward(&mut self) -> PanelCommand {
        let PanelState::Live { changelog, .. } = &mut self.state else {
            return PanelCommand::Noop;
        };

        match changelog.step_forward() {
            Some(entry) => {
                let data = project_entry(entry);
                debug!(cursor = ?changelog.cursor(), "Stepped forward");
                PanelCommand::Update { data }
            }
            None => {
                debug!(cursor = ?changelog.cursor(), "Cannot step forward");
                PanelCommand::Noop
            }
        }
    }

    /// Undo the previous recorded entry
    pub fn step_back(&mut self) -> PanelCommand {
        let PanelState::Live { changelog, .. } = &mut self.state else {
            return PanelCommand::Noop;
        };

        match changelog.step_back() {
            Some(inverted) => {
                debug!(cursor = ?changelog.cursor(), "Stepped back");
                PanelCommand::Update { data: project_entry(&inverted) }
            }
            None => {
                debug!(cursor = ?changelog.cursor(), "Cannot step back");
                PanelCommand::Noop
            }
        }
    }

    /// Discard snapshot and history; the next snapshot initializes again
    pub fn teardown(&mut self) {
        if let PanelState::Live { changelog, .. } = &self.state {
            info!(history = changelog.len(), "Tearing down panel");
        }
        self.state = PanelState::Empty;
    }

    /// Whether a snapshot has been received since the last teardown
    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Live { .. })
    }

    /// Current cursor; live when nothing has been recorded
    pub fn cursor(&self) -> Cursor {
        self.changelog().map_or(Cursor::Live, Changelog::cursor)
    }

    /// Whether the panel shows the live state
    pub fn is_live(&self) -> bool {
        self.changelog().is_none_or(|changelog| !changelog.is_browsing())
    }

    /// Number of recorded changelog entries
    pub fn history_len(&self) -> usize {
        self.changelog().map_or(0, Changelog::len)
    }

    /// Most recent snapshot received from the debuggee
    pub fn current_snapshot(&self) -> Option<&VariableSnapshot> {
        match &self.state {
            PanelState::Live { snapshot, .. } => Some(snapshot),
            PanelState::Empty => None,
        }
    }

    /// Recorded history, if the panel is live
    pub fn changelog(&self) -> Option<&Changelog> {
        match &self.state {
            PanelState::Live { changelog, .. } => Some(changelog),
            PanelState::Empty => None,
        }
    }
}
