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

//! Kind prefixes carried by node ids.
//!
//! The debug-event source namespaces every id it hands out so that stack
//! variables, heap objects, null placeholders and renderer clusters can never
//! collide, and so the renderer can style them differently.

use serde::{Deserialize, Serialize};

const VARIABLE_PREFIX: &str = "variable_";
const OBJECT_PREFIX: &str = "object_";
const NULL_PREFIX: &str = "null_";
const CLUSTER_PREFIX: &str = "cluster_";

/// Kind of a node, derived from its id prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A variable visible in the current stack frame
    Variable,
    /// A heap object reachable from some variable
    Object,
    /// Placeholder for a null reference
    Null,
    /// A renderer-side cluster of nodes
    Cluster,
    /// Id without a known prefix
    Other,
}

impl NodeKind {
    /// Classify a node id by its prefix
    pub fn of(id: &str) -> Self {
        if id.starts_with(VARIABLE_PREFIX) {
            Self::Variable
        } else if id.starts_with(OBJECT_PREFIX) {
            Self::Object
        } else if id.starts_with(NULL_PREFIX) {
            Self::Null
        } else if id.starts_with(CLUSTER_PREFIX) {
            Self::Cluster
        } else {
            Self::Other
        }
    }
}
