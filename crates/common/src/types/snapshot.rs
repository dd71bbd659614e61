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

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{EdgeKey, Variable};

/// Errors raised while assembling a [`VariableSnapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Two variables in the same snapshot share an id
    #[error("duplicate variable id `{0}` in snapshot")]
    DuplicateVariable(String),
}

/// The complete variable graph at one debugger stop.
///
/// Variables are keyed by id and iterated in id order, so everything derived
/// from a snapshot (diffs, projections, exports) is deterministic. On the wire
/// a snapshot is a plain list of variables; decoding rejects duplicate ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Variable>", into = "Vec<Variable>")]
pub struct VariableSnapshot {
    variables: BTreeMap<String, Variable>,
}

impl VariableSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a list of variables, rejecting duplicate ids
    pub fn from_variables(
        variables: impl IntoIterator<Item = Variable>,
    ) -> Result<Self, SnapshotError> {
        let mut snapshot = Self::new();
        for variable in variables {
            snapshot.insert(variable)?;
        }
        Ok(snapshot)
    }

    /// Add a variable, rejecting it if its id is already present
    pub fn insert(&mut self, variable: Variable) -> Result<(), SnapshotError> {
        match self.variables.entry(variable.id.clone()) {
            btree_map::Entry::Occupied(entry) => {
                Err(SnapshotError::DuplicateVariable(entry.key().clone()))
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(variable);
                Ok(())
            }
        }
    }

    /// Look up a variable by id
    pub fn get(&self, id: &str) -> Option<&Variable> {
        self.variables.get(id)
    }

    /// Whether a variable with this id is present
    pub fn contains(&self, id: &str) -> bool {
        self.variables.contains_key(id)
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the snapshot holds no variables
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variable ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.keys().map(String::as_str)
    }

    /// Variables in id order
    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.variables.values()
    }

    /// Every edge of the graph, grouped by child in id order
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.variables.values().flat_map(Variable::incoming_edges)
    }
}

impl TryFrom<Vec<Variable>> for VariableSnapshot {
    type Error = SnapshotError;

    fn try_from(variables: Vec<Variable>) -> Result<Self, Self::Error> {
        Self::from_variables(variables)
    }
}

impl From<VariableSnapshot> for Vec<Variable> {
    fn from(snapshot: VariableSnapshot) -> Self {
        snapshot.variables.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a VariableSnapshot {
    type Item = &'a Variable;
    type IntoIter = btree_map::Values<'a, String, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.values()
    }
}
