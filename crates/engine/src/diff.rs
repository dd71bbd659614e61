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

//! Snapshot diffing
//!
//! Computes the [`ChangelogEntry`] that turns one [`VariableSnapshot`] into
//! the next. Variables are matched by id and edges by their composite
//! [`EdgeKey`](vodb_common::EdgeKey), so the result does not depend on the
//! order in which the debug-event source reports variables or relations.

use tracing::trace;
use vodb_common::{EdgeKey, Variable, VariableSnapshot};

use crate::{ChangelogEntry, EdgeChange, NodeChange};

/// Compute the changes that turn `old` into `new`.
///
/// Node changes are emitted as updates, then creations, then deletions; edge
/// changes as relation changes of surviving variables, then edges of created
/// variables, then edges of deleted variables. Within each group variables
/// are visited in id order. Relations pointing at unknown parents are passed
/// through unchanged.
pub fn diff_snapshots(old: &VariableSnapshot, new: &VariableSnapshot) -> ChangelogEntry {
    let mut node_changes = Vec::new();
    let mut edge_changes = Vec::new();

    // Variables present in both snapshots
    for old_variable in old.variables() {
        let Some(new_variable) = new.get(&old_variable.id) else { continue };

        if old_variable.display_differs(new_variable) {
            node_changes.push(NodeChange::Update {
                old_node: old_variable.clone(),
                new_node: new_variable.clone(),
            });
        }
        edge_changes.extend(relation_changes(old_variable, new_variable));
    }

    let mut created_edges = Vec::new();
    for variable in new.variables().filter(|v| !old.contains(&v.id)) {
        node_changes.push(NodeChange::Create { node: variable.clone() });
        created_edges.extend(variable.incoming_edges().map(|edge| EdgeChange::Create { edge }));
    }

    let mut deleted_edges = Vec::new();
    for variable in old.variables().filter(|v| !new.contains(&v.id)) {
        node_changes.push(NodeChange::Delete { node: variable.clone() });
        deleted_edges.extend(variable.incoming_edges().map(|edge| EdgeChange::Delete { edge }));
    }

    edge_changes.extend(created_edges);
    edge_changes.extend(deleted_edges);

    let entry = ChangelogEntry::from_changes(node_changes, edge_changes);
    trace!(
        nodes = entry.node_changes.len(),
        edges = entry.edge_changes.len(),
        "Computed snapshot diff"
    );
    entry
}

/// Edge changes for a variable present in both snapshots.
///
/// Relations are compared as sets keyed by parent and relation name; the
/// order they are listed in is irrelevant.
fn relation_changes<'a>(
    old: &'a Variable,
    new: &'a Variable,
) -> impl Iterator<Item = EdgeChange> + 'a {
    let added = new
        .incoming_relations
        .iter()
        .filter(move |relation| !old.has_relation(relation))
        .map(move |relation| EdgeChange::Create { edge: EdgeKey::from_relation(relation, &new.id) });
    let removed = old
        .incoming_relations
        .iter()
        .filter(move |relation| !new.has_relation(relation))
        .map(move |relation| EdgeChange::Delete { edge: EdgeKey::from_relation(relation, &old.id) });

    added.chain(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vodb_common::PrimitiveValue;

    fn snapshot(variables: impl IntoIterator<Item = Variable>) -> VariableSnapshot {
        VariableSnapshot::from_variables(variables).unwrap()
    }

    #[test]
    fn test_value_change_and_new_child() {
        let a = snapshot([Variable::new("v1").with_name("x").with_value("1")]);
        let b = snapshot([
            Variable::new("v1").with_name("x").with_value("2"),
            Variable::new("v2").with_name("y").with_relation("v1", "next"),
        ]);

        let entry = diff_snapshots(&a, &b);

        assert_eq!(entry.node_changes.len(), 2);
        match &entry.node_changes[0] {
            NodeChange::Update { old_node, new_node } => {
                assert_eq!(old_node.id, "v1");
                assert_eq!(old_node.value.as_deref(), Some("1"));
                assert_eq!(new_node.value.as_deref(), Some("2"));
            }
            other => panic!("Expected Update, got {other:?}"),
        }
        assert!(matches!(&entry.node_changes[1], NodeChange::Create { node } if node.id == "v2"));
        assert_eq!(
            entry.edge_changes,
            vec![EdgeChange::Create { edge: EdgeKey::new("v1", "v2", "next") }]
        );
    }

    #[test]
    fn test_identical_snapshots_produce_empty_entry() {
        let s = snapshot([
            Variable::new("v1").with_name("x").with_type("Node").with_tooltip("x: Node"),
            Variable::new("v2")
                .with_primitive(PrimitiveValue::new("int", "val", "3"))
                .with_relation("v1", "next"),
        ]);

        assert!(diff_snapshots(&s, &s).is_empty());
        assert!(diff_snapshots(&VariableSnapshot::new(), &VariableSnapshot::new()).is_empty());
    }

    #[test]
    fn test_reordered_relations_are_not_a_change() {
        let a = snapshot([
            Variable::new("p"),
            Variable::new("q"),
            Variable::new("c").with_relation("p", "left").with_relation("q", "right"),
        ]);
        let b = snapshot([
            Variable::new("p"),
            Variable::new("q"),
            Variable::new("c").with_relation("q", "right").with_relation("p", "left"),
        ]);

        let entry = diff_snapshots(&a, &b);
        assert!(entry.edge_changes.is_empty());
        assert!(entry.node_changes.is_empty());
    }

    #[test]
    fn test_renamed_relation_is_delete_plus_create() {
        let a = snapshot([Variable::new("p"), Variable::new("c").with_relation("p", "next")]);
        let b = snapshot([Variable::new("p"), Variable::new("c").with_relation("p", "prev")]);

        let entry = diff_snapshots(&a, &b);

        assert!(entry.node_changes.is_empty());
        assert_eq!(
            entry.edge_changes,
            vec![
                EdgeChange::Create { edge: EdgeKey::new("p", "c", "prev") },
                EdgeChange::Delete { edge: EdgeKey::new("p", "c", "next") },
            ]
        );
    }

    #[test]
    fn test_deleted_variable_drops_its_incoming_edges() {
        let a = snapshot([Variable::new("p"), Variable::new("c").with_relation("p", "child")]);
        let b = snapshot([Variable::new("p")]);

        let entry = diff_snapshots(&a, &b);

        assert!(matches!(&entry.node_changes[..], [NodeChange::Delete { node }] if node.id == "c"));
        assert_eq!(
            entry.edge_changes,
            vec![EdgeChange::Delete { edge: EdgeKey::new("p", "c", "child") }]
        );
    }

    #[test]
    fn test_primitive_reorder_is_an_update() {
        let a = snapshot([Variable::new("o")
            .with_primitive(PrimitiveValue::new("int", "a", "1"))
            .with_primitive(PrimitiveValue::new("int", "b", "2"))]);
        let b = snapshot([Variable::new("o")
            .with_primitive(PrimitiveValue::new("int", "b", "2"))
            .with_primitive(PrimitiveValue::new("int", "a", "1"))]);

        let entry = diff_snapshots(&a, &b);
        assert!(matches!(&entry.node_changes[..], [NodeChange::Update { .. }]));
    }

    #[test]
    fn test_duplicate_relations_collapse() {
        let a = snapshot([Variable::new("p")]);
        let b = snapshot([
            Variable::new("p"),
            Variable::new("c").with_relation("p", "next").with_relation("p", "next"),
        ]);

        let entry = diff_snapshots(&a, &b);
        assert_eq!(
            entry.edge_changes,
            vec![EdgeChange::Create { edge: EdgeKey::new("p", "c", "next") }]
        );
    }

    #[test]
    fn test_dangling_parent_is_passed_through() {
        let a = snapshot([]);
        let b = snapshot([Variable::new("c").with_relation("ghost", "owner")]);

        let entry = diff_snapshots(&a, &b);
        assert_eq!(
            entry.edge_changes,
            vec![EdgeChange::Create { edge: EdgeKey::new("ghost", "c", "owner") }]
        );
    }
}
