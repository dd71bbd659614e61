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

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::types::VariableRelation;

/// Identity of an edge in the variable graph.
///
/// Edges carry no assigned id. Two edges are the same edge exactly when
/// parent, child and relation name all match, which keeps edge identity
/// stable across snapshots regardless of the order relations are reported in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeKey {
    /// Id of the variable the edge starts from
    pub parent_id: String,
    /// Id of the variable the edge points to
    pub child_id: String,
    /// Name of the relation, used as the edge label
    pub relation_name: String,
}

impl EdgeKey {
    /// Create a new edge key
    pub fn new(
        parent_id: impl Into<String>,
        child_id: impl Into<String>,
        relation_name: impl Into<String>,
    ) -> Self {
        Self {
            parent_id: parent_id.into(),
            child_id: child_id.into(),
            relation_name: relation_name.into(),
        }
    }

    /// Build the key of an incoming relation recorded on `child_id`
    pub fn from_relation(relation: &VariableRelation, child_id: &str) -> Self {
        Self::new(&relation.parent_id, child_id, &relation.relation_name)
    }

    /// Renderer-facing edge id derived from the composite key.
    ///
    /// Parent and child are length-prefixed so distinct keys never share an id,
    /// e.g. `(a, btoc, r)` and `(atob, c, r)`.
    pub fn id(&self) -> String {
        format!(
            "{}:{}to{}:{}withName{}",
            self.parent_id.len(),
            self.parent_id,
            self.child_id.len(),
            self.child_id,
            self.relation_name
        )
    }
}

impl Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.parent_id, self.relation_name, self.child_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_id_format() {
        let edge = EdgeKey::new("variable_a", "object_7", "next");
        assert_eq!(edge.id(), "10:variable_ato8:object_7withNamenext");
    }

    #[test]
    fn test_edge_ids_do_not_collide() {
        let first = EdgeKey::new("a", "btoc", "r");
        let second = EdgeKey::new("atob", "c", "r");
        assert_ne!(first.id(), second.id());

        let first = EdgeKey::new("p", "c", "1:x");
        let second = EdgeKey::new("p", "c1:x", "");
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_edge_display() {
        let edge = EdgeKey::new("v1", "v2", "left");
        assert_eq!(edge.to_string(), "v1 -[left]-> v2");
    }

    #[test]
    fn test_from_relation() {
        let relation = VariableRelation::new("p", "child");
        assert_eq!(EdgeKey::from_relation(&relation, "c"), EdgeKey::new("p", "c", "child"));
    }
}
