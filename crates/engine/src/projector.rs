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

//! Graph projection
//!
//! Turns snapshots and changelog entries into the renderer-facing schema:
//! a full node/edge set when a panel opens, and add/update/remove
//! instructions afterwards.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use vodb_common::{EdgeKey, NodeKind, Variable, VariableSnapshot};

use crate::{ChangelogEntry, EdgeChange, NodeChange};

/// Visual style tag attached to every rendered element.
///
/// The renderer maps tags to colors; stack variables get their own flavour
/// so they stand out from the heap objects they point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementStyle {
    /// Unchanged element
    Default,
    /// Unchanged stack variable
    Variable,
    /// Element added or updated by the last instruction set
    Changed,
    /// Stack variable added or updated by the last instruction set
    ChangedVariable,
}

impl ElementStyle {
    /// Style for the node with this id
    pub fn for_node(id: &str, changed: bool) -> Self {
        match (NodeKind::of(id) == NodeKind::Variable, changed) {
            (true, true) => Self::ChangedVariable,
            (true, false) => Self::Variable,
            (false, true) => Self::Changed,
            (false, false) => Self::Default,
        }
    }

    /// Style for an edge
    pub fn for_edge(changed: bool) -> Self {
        if changed {
            Self::Changed
        } else {
            Self::Default
        }
    }
}

/// A node as handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node id, equal to the variable id
    pub id: String,
    /// Multi-line label
    pub label: String,
    /// Hover text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Visual style tag
    pub style: ElementStyle,
}

/// An edge as handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Edge id derived from the edge key
    pub id: String,
    /// Parent node id
    pub from: String,
    /// Child node id
    pub to: String,
    /// Relation name
    pub label: String,
    /// Visual style tag
    pub style: ElementStyle,
}

/// Complete graph content for a freshly opened panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    /// All nodes
    pub nodes: Vec<GraphNode>,
    /// All edges
    pub edges: Vec<GraphEdge>,
}

/// Incremental changes to an already rendered graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstructions {
    /// Nodes to add
    pub add_nodes: Vec<GraphNode>,
    /// Nodes to replace, keyed by id
    pub update_nodes: Vec<GraphNode>,
    /// Ids of nodes to remove
    pub delete_node_ids: Vec<String>,
    /// Edges to add
    pub add_edges: Vec<GraphEdge>,
    /// Ids of edges to remove
    pub delete_edge_ids: Vec<String>,
}

/// Layout options sent along with the initial graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Node shape understood by the renderer
    pub node_shape: String,
    /// Where edges carry arrow heads
    pub edge_arrows: String,
    /// Physics solver used for layout
    pub physics_solver: String,
    /// Preferred distance between nodes
    pub node_distance: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            node_shape: "box".to_string(),
            edge_arrows: "to".to_string(),
            physics_solver: "repulsion".to_string(),
            node_distance: 100,
        }
    }
}

/// One message for the rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelCommand {
    /// Replace whatever is shown with this graph
    Initialize {
        /// Full graph content
        data: GraphData,
        /// Layout options
        options: RenderOptions,
    },
    /// Apply incremental changes
    Update {
        /// Instructions to apply
        data: UpdateInstructions,
    },
    /// Nothing to do
    Noop,
}

impl PanelCommand {
    /// Whether this is a no-op
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }
}

/// Build the label of a variable's node.
///
/// The top line is `(type) name`, with either part omitted when empty. The
/// body is the value if there is one, otherwise every primitive field as
/// `(type) name: value`, one per line. Top line and body are joined by
/// `":\n"`.
pub fn node_label(variable: &Variable) -> String {
    match label_parts(variable) {
        (top_line, None) => top_line,
        (top_line, Some(body)) if top_line.is_empty() => body,
        (top_line, Some(body)) => format!("{top_line}:\n{body}"),
    }
}

/// Top line and non-empty body of a node label
pub(crate) fn label_parts(variable: &Variable) -> (String, Option<String>) {
    let top_line = match (variable.ty.is_empty(), variable.name.is_empty()) {
        (false, false) => format!("({}) {}", variable.ty, variable.name),
        (false, true) => format!("({})", variable.ty),
        (true, false) => variable.name.clone(),
        (true, true) => String::new(),
    };

    let body = match variable.value.as_deref() {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ if !variable.primitive_values.is_empty() => Some(
            variable
                .primitive_values
                .iter()
                .map(|p| format!("({}) {}: {}", p.ty, p.name, p.value))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        _ => None,
    };

    (top_line, body)
}

/// Project one variable to a node
pub fn project_node(variable: &Variable, changed: bool) -> GraphNode {
    GraphNode {
        id: variable.id.clone(),
        label: node_label(variable),
        title: variable.tooltip.clone(),
        style: ElementStyle::for_node(&variable.id, changed),
    }
}

/// Project one edge
pub fn project_edge(edge: &EdgeKey, changed: bool) -> GraphEdge {
    GraphEdge {
        id: edge.id(),
        from: edge.parent_id.clone(),
        to: edge.child_id.clone(),
        label: edge.relation_name.clone(),
        style: ElementStyle::for_edge(changed),
    }
}

/// Full projection of a snapshot: every variable becomes a node and every
/// distinct incoming relation an edge.
pub fn project_snapshot(snapshot: &VariableSnapshot) -> GraphData {
    GraphData {
        nodes: snapshot.variables().map(|v| project_node(v, false)).collect(),
        edges: snapshot.edges().unique().map(|e| project_edge(&e, false)).collect(),
    }
}

/// Incremental projection of a changelog entry, forward or inverted
pub fn project_entry(entry: &ChangelogEntry) -> UpdateInstructions {
    let mut instructions = UpdateInstructions::default();

    for change in &entry.node_changes {
        match change {
            NodeChange::Create { node } => instructions.add_nodes.push(project_node(node, true)),
            NodeChange::Update { new_node, .. } => {
                instructions.update_nodes.push(project_node(new_node, true))
            }
            NodeChange::Delete { node } => instructions.delete_node_ids.push(node.id.clone()),
        }
    }

    for change in &entry.edge_changes {
        match change {
            EdgeChange::Create { edge } => instructions.add_edges.push(project_edge(edge, true)),
            EdgeChange::Delete { edge } => instructions.delete_edge_ids.push(edge.id()),
        }
    }

    instructions
}

#[cfg(test)]
mod tests {
    use super::*;
    use vodb_common::PrimitiveValue;

    #[test]
    fn test_label_with_value() {
        let v = Variable::new("v1").with_type("int").with_name("x").with_value("42");
        assert_eq!(node_label(&v), "(int) x:\n42");
    }

    #[test]
    fn test_label_with_primitives() {
        let v = Variable::new("o1")
            .with_type("Point")
            .with_name("p")
            .with_primitive(PrimitiveValue::new("int", "x", "1"))
            .with_primitive(PrimitiveValue::new("int", "y", "2"));
        assert_eq!(node_label(&v), "(Point) p:\n(int) x: 1\n(int) y: 2");
    }

    #[test]
    fn test_label_value_wins_over_primitives() {
        let v = Variable::new("o1")
            .with_name("s")
            .with_value("\"hi\"")
            .with_primitive(PrimitiveValue::new("int", "len", "2"));
        assert_eq!(node_label(&v), "s:\n\"hi\"");
    }

    #[test]
    fn test_label_partial_parts() {
        assert_eq!(node_label(&Variable::new("a").with_type("Node")), "(Node)");
        assert_eq!(node_label(&Variable::new("a").with_name("head")), "head");
        assert_eq!(node_label(&Variable::new("a").with_value("null")), "null");
        assert_eq!(node_label(&Variable::new("a")), "");
    }

    #[test]
    fn test_styles() {
        assert_eq!(ElementStyle::for_node("variable_x", false), ElementStyle::Variable);
        assert_eq!(ElementStyle::for_node("variable_x", true), ElementStyle::ChangedVariable);
        assert_eq!(ElementStyle::for_node("object_1", true), ElementStyle::Changed);
        assert_eq!(ElementStyle::for_node("object_1", false), ElementStyle::Default);
        assert_eq!(ElementStyle::for_edge(true), ElementStyle::Changed);
    }

    #[test]
    fn test_project_snapshot() {
        let snapshot = VariableSnapshot::from_variables([
            Variable::new("variable_list").with_name("list").with_tooltip("List<int>"),
            Variable::new("object_1").with_type("Node").with_relation("variable_list", "head"),
        ])
        .unwrap();

        let data = project_snapshot(&snapshot);

        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.edges.len(), 1);
        let list = data.nodes.iter().find(|n| n.id == "variable_list").unwrap();
        assert_eq!(list.title.as_deref(), Some("List<int>"));
        assert_eq!(list.style, ElementStyle::Variable);
        assert_eq!(data.edges[0].from, "variable_list");
        assert_eq!(data.edges[0].to, "object_1");
        assert_eq!(data.edges[0].label, "head");
        assert_eq!(data.edges[0].style, ElementStyle::Default);
    }

    #[test]
    fn test_project_snapshot_collapses_repeated_relation() {
        let snapshot = VariableSnapshot::from_variables([
            Variable::new("p"),
            Variable::new("c").with_relation("p", "next").with_relation("p", "next"),
        ])
        .unwrap();

        let data = project_snapshot(&snapshot);

        assert_eq!(data.edges.len(), 1);
        assert_eq!(data.edges[0].id, EdgeKey::new("p", "c", "next").id());
    }

    #[test]
    fn test_project_entry() {
        let old = Variable::new("v1").with_name("x").with_value("1");
        let entry = ChangelogEntry::from_changes(
            [
                NodeChange::Update { old_node: old.clone(), new_node: old.with_value("2") },
                NodeChange::Create { node: Variable::new("v2") },
                NodeChange::Delete { node: Variable::new("v3") },
            ],
            [
                EdgeChange::Create { edge: EdgeKey::new("v1", "v2", "next") },
                EdgeChange::Delete { edge: EdgeKey::new("v1", "v3", "next") },
            ],
        );

        let instructions = project_entry(&entry);

        assert_eq!(instructions.update_nodes.len(), 1);
        assert_eq!(instructions.update_nodes[0].label, "x:\n2");
        assert_eq!(instructions.update_nodes[0].style, ElementStyle::Changed);
        assert_eq!(instructions.add_nodes[0].id, "v2");
        assert_eq!(instructions.delete_node_ids, vec!["v3".to_string()]);
        assert_eq!(instructions.add_edges[0].id, EdgeKey::new("v1", "v2", "next").id());
        assert_eq!(instructions.add_edges[0].style, ElementStyle::Changed);
        assert_eq!(instructions.delete_edge_ids, vec![EdgeKey::new("v1", "v3", "next").id()]);
    }

    #[test]
    fn test_panel_command_serialization() {
        let json = serde_json::to_string(&PanelCommand::Noop).unwrap();
        assert_eq!(json, r#"{"command":"noop"}"#);

        let update = PanelCommand::Update { data: UpdateInstructions::default() };
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"command\":\"update\""));
        assert!(json.contains("\"deleteNodeIds\":[]"));

        let init =
            PanelCommand::Initialize { data: GraphData::default(), options: RenderOptions::default() };
        let json = serde_json::to_string(&init).unwrap();
        assert!(json.contains("\"command\":\"initialize\""));
        assert!(json.contains("\"nodeDistance\":100"));
    }
}
