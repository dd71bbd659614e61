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

//! Changelog entries and their inversion
//!
//! A [`ChangelogEntry`] records how the variable graph changed between two
//! consecutive snapshots. Every entry can be inverted, which is what lets the
//! panel walk backwards through history by replaying undo entries.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use vodb_common::{EdgeKey, Variable};

/// A change to a single node of the graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NodeChange {
    /// A variable appeared
    Create {
        /// The new variable
        node: Variable,
    },
    /// A variable's rendered content changed
    Update {
        /// Variable as it was before
        old_node: Variable,
        /// Variable as it is now
        new_node: Variable,
    },
    /// A variable disappeared
    Delete {
        /// The variable as last seen
        node: Variable,
    },
}

impl NodeChange {
    /// The change that undoes this one
    pub fn invert(&self) -> Self {
        match self {
            Self::Create { node } => Self::Delete { node: node.clone() },
            Self::Delete { node } => Self::Create { node: node.clone() },
            Self::Update { old_node, new_node } => {
                Self::Update { old_node: new_node.clone(), new_node: old_node.clone() }
            }
        }
    }
}

/// A change to a single edge of the graph.
///
/// Edges have no update variant: a relation whose parent or name changes is a
/// different edge, recorded as a delete plus a create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum EdgeChange {
    /// An edge appeared
    Create {
        /// Identity of the new edge
        edge: EdgeKey,
    },
    /// An edge disappeared
    Delete {
        /// Identity of the removed edge
        edge: EdgeKey,
    },
}

impl EdgeChange {
    /// The change that undoes this one
    pub fn invert(&self) -> Self {
        match self {
            Self::Create { edge } => Self::Delete { edge: edge.clone() },
            Self::Delete { edge } => Self::Create { edge: edge.clone() },
        }
    }
}

/// The diff between two consecutive snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntry {
    /// Node changes in emission order
    pub node_changes: Vec<NodeChange>,
    /// Edge changes in emission order
    pub edge_changes: Vec<EdgeChange>,
}

impl ChangelogEntry {
    /// Build an entry, collapsing structurally identical changes.
    ///
    /// The first occurrence of a change keeps its position; later copies with
    /// the same variant and payload are dropped.
    pub fn from_changes(
        node_changes: impl IntoIterator<Item = NodeChange>,
        edge_changes: impl IntoIterator<Item = EdgeChange>,
    ) -> Self {
        Self {
            node_changes: node_changes.into_iter().unique().collect(),
            edge_changes: edge_changes.into_iter().unique().collect(),
        }
    }

    /// Whether the entry records no change at all
    pub fn is_empty(&self) -> bool {
        self.node_changes.is_empty() && self.edge_changes.is_empty()
    }

    /// Total number of node and edge changes
    pub fn len(&self) -> usize {
        self.node_changes.len() + self.edge_changes.len()
    }

    /// The entry that undoes this one. Change order is preserved.
    pub fn invert(&self) -> Self {
        Self {
            node_changes: self.node_changes.iter().map(NodeChange::invert).collect(),
            edge_changes: self.edge_changes.iter().map(EdgeChange::invert).collect(),
        }
    }
}
