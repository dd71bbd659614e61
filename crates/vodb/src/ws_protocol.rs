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

//! WebSocket protocol definitions for VODB server mode
//!
//! Each WebSocket connection drives one panel. The client sends a
//! [`PanelRequest`] per debugger event and the server answers every request
//! with exactly one [`PanelResponse`] carrying the renderer command.

use serde::{Deserialize, Serialize};
use vodb_common::VariableSnapshot;
use vodb_engine::{PanelCommand, PanelSession};

/// Request sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelRequest {
    /// The debugger stopped and produced a new snapshot
    Snapshot {
        /// Variables visible at this stop
        variables: VariableSnapshot,
    },
    /// Undo one recorded step
    StepBack,
    /// Redo one recorded step
    StepForward,
    /// The panel was closed
    Teardown,
}

impl PanelRequest {
    /// Apply this request to `session` and return the renderer command
    pub fn apply(self, session: &mut PanelSession) -> PanelCommand {
        match self {
            Self::Snapshot { variables } => session.submit_snapshot(variables),
            Self::StepBack => session.step_back(),
            Self::StepForward => session.step_forward(),
            Self::Teardown => {
                session.teardown();
                PanelCommand::Noop
            }
        }
    }
}

/// Response sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PanelResponse {
    /// The request was applied
    Ok {
        /// What the renderer should do
        result: PanelCommand,
    },
    /// The request could not be understood
    Error {
        /// Error message
        message: String,
    },
}

impl PanelResponse {
    /// Create a success response
    pub fn ok(result: PanelCommand) -> Self {
        Self::Ok { result }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}
