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

use serde::{Deserialize, Serialize};

use crate::types::EdgeKey;

/// An inline scalar field rendered inside its owner's node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveValue {
    /// Declared type of the field
    #[serde(rename = "type")]
    pub ty: String,
    /// Field name
    pub name: String,
    /// Rendered scalar value
    pub value: String,
}

impl PrimitiveValue {
    /// Create a new primitive field
    pub fn new(ty: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { ty: ty.into(), name: name.into(), value: value.into() }
    }
}

/// A named edge pointing into a variable from one of its parents.
///
/// Relations are compared by `(parent_id, relation_name)`; the child is the
/// variable that records the relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRelation {
    /// Id of the variable the edge starts from
    pub parent_id: String,
    /// Name of the field or slot holding the reference
    pub relation_name: String,
}

impl VariableRelation {
    /// Create a new relation from `parent_id` named `relation_name`
    pub fn new(parent_id: impl Into<String>, relation_name: impl Into<String>) -> Self {
        Self { parent_id: parent_id.into(), relation_name: relation_name.into() }
    }
}

/// A node in the variable graph.
///
/// The `id` is stable across snapshots for the same runtime entity, which is
/// what lets two snapshots be diffed without relying on insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Stable identifier, unique within a snapshot
    pub id: String,
    /// Variable or field name (empty when anonymous)
    #[serde(default)]
    pub name: String,
    /// Declared type (empty when unknown)
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Rendered scalar value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Hover text shown by the renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Inline scalar fields, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primitive_values: Vec<PrimitiveValue>,
    /// Edges pointing into this variable
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incoming_relations: Vec<VariableRelation>,
}

impl Variable {
    /// Create a variable with the given id and no other data
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            ty: String::new(),
            value: None,
            tooltip: None,
            primitive_values: Vec::new(),
            incoming_relations: Vec::new(),
        }
    }

    /// Set the variable name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the declared type
    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = ty.into();
        self
    }

    /// Set the rendered value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the tooltip
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Append an inline primitive field
    pub fn with_primitive(mut self, primitive: PrimitiveValue) -> Self {
        self.primitive_values.push(primitive);
        self
    }

    /// Append an incoming relation from `parent_id`
    pub fn with_relation(
        mut self,
        parent_id: impl Into<String>,
        relation_name: impl Into<String>,
    ) -> Self {
        self.incoming_relations.push(VariableRelation::new(parent_id, relation_name));
        self
    }

    /// Whether the rendered part of two variables differs.
    ///
    /// Compares value, tooltip, type, name and primitive values. The primitive
    /// list is compared in order since the node label is built from it.
    /// Relations are not part of the comparison.
    pub fn display_differs(&self, other: &Self) -> bool {
        self.value != other.value
            || self.tooltip != other.tooltip
            || self.ty != other.ty
            || self.name != other.name
            || self.primitive_values != other.primitive_values
    }

    /// Whether this variable already records an incoming relation with the same identity
    pub fn has_relation(&self, relation: &VariableRelation) -> bool {
        self.incoming_relations.iter().any(|r| {
            r.parent_id == relation.parent_id && r.relation_name == relation.relation_name
        })
    }

    /// Edge keys for every incoming relation, in recorded order
    pub fn incoming_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.incoming_relations.iter().map(move |r| EdgeKey::from_relation(r, &self.id))
    }
}
