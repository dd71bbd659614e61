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

//! In-process replica of the renderer's graph
//!
//! [`RenderedGraph`] applies [`PanelCommand`]s the way the rendering
//! collaborator does, so the CLI can report what ends up on screen and tests
//! can compare displayed states. Styles are ignored: two graphs are equal
//! when they show the same labels and connections.

use std::collections::BTreeMap;

use tracing::trace;

use crate::{GraphData, GraphEdge, GraphNode, PanelCommand, UpdateInstructions};

/// Rendered content of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNode {
    /// Label text
    pub label: String,
    /// Hover text
    pub title: Option<String>,
}

/// Rendered content of an edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEdge {
    /// Parent node id
    pub from: String,
    /// Child node id
    pub to: String,
    /// Label text
    pub label: String,
}

/// Graph as currently displayed by a renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedGraph {
    nodes: BTreeMap<String, RenderedNode>,
    edges: BTreeMap<String, RenderedEdge>,
}

impl RenderedGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph showing exactly `data`
    pub fn from_data(data: &GraphData) -> Self {
        let mut graph = Self::new();
        data.nodes.iter().for_each(|node| graph.put_node(node));
        data.edges.iter().for_each(|edge| graph.put_edge(edge));
        graph
    }

    /// Apply one command; `Initialize` replaces the whole graph
    pub fn apply_command(&mut self, command: &PanelCommand) {
        match command {
            PanelCommand::Initialize { data, .. } => *self = Self::from_data(data),
            PanelCommand::Update { data } => self.apply(data),
            PanelCommand::Noop => {}
        }
    }

    /// Apply incremental instructions. Removing an unknown id is ignored.
    pub fn apply(&mut self, instructions: &UpdateInstructions) {
        instructions.add_nodes.iter().for_each(|node| self.put_node(node));
        instructions.update_nodes.iter().for_each(|node| self.put_node(node));
        for id in &instructions.delete_node_ids {
            if self.nodes.remove(id).is_none() {
                trace!(id, "Removing unknown node");
            }
        }

        instructions.add_edges.iter().for_each(|edge| self.put_edge(edge));
        for id in &instructions.delete_edge_ids {
            if self.edges.remove(id).is_none() {
                trace!(id, "Removing unknown edge");
            }
        }
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Rendered node by id
    pub fn node(&self, id: &str) -> Option<&RenderedNode> {
        self.nodes.get(id)
    }

    /// Edges whose endpoints are not both displayed
    pub fn dangling_edges(&self) -> impl Iterator<Item = (&str, &RenderedEdge)> + '_ {
        self.edges
            .iter()
            .filter(|(_, e)| !self.nodes.contains_key(&e.from) || !self.nodes.contains_key(&e.to))
            .map(|(id, e)| (id.as_str(), e))
    }

    fn put_node(&mut self, node: &GraphNode) {
        self.nodes.insert(
            node.id.clone(),
            RenderedNode { label: node.label.clone(), title: node.title.clone() },
        );
    }

    fn put_edge(&mut self, edge: &GraphEdge) {
        self.edges.insert(
            edge.id.clone(),
            RenderedEdge { from: edge.from.clone(), to: edge.to.clone(), label: edge.label.clone() },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{project_snapshot, RenderOptions};
    use vodb_common::{EdgeKey, Variable, VariableSnapshot};

    #[test]
    fn test_initialize_replaces_content() {
        let first = VariableSnapshot::from_variables([Variable::new("a"), Variable::new("b")])
            .unwrap();
        let second = VariableSnapshot::from_variables([Variable::new("c")]).unwrap();

        let mut graph = RenderedGraph::from_data(&project_snapshot(&first));
        assert_eq!(graph.node_count(), 2);

        graph.apply_command(&PanelCommand::Initialize {
            data: project_snapshot(&second),
            options: RenderOptions::default(),
        });
        assert_eq!(graph.node_count(), 1);
        assert!(graph.node("c").is_some());
    }

    #[test]
    fn test_remove_unknown_ids_is_ignored() {
        let mut graph = RenderedGraph::new();
        graph.apply(&UpdateInstructions {
            delete_node_ids: vec!["ghost".to_string()],
            delete_edge_ids: vec![EdgeKey::new("ghost", "x", "y").id()],
            ..Default::default()
        });
        assert_eq!(graph, RenderedGraph::new());
    }

    #[test]
    fn test_dangling_edges() {
        let snapshot =
            VariableSnapshot::from_variables([Variable::new("c").with_relation("ghost", "owner")])
                .unwrap();
        let graph = RenderedGraph::from_data(&project_snapshot(&snapshot));

        let dangling: Vec<_> = graph.dangling_edges().map(|(id, _)| id).collect();
        assert_eq!(dangling, vec![EdgeKey::new("ghost", "c", "owner").id()]);
    }
}
