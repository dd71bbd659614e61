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

//! Text exports of a snapshot
//!
//! Renders the graph of a [`VariableSnapshot`] as GraphViz DOT or as a
//! PlantUML object diagram. Output is deterministic: nodes follow id order
//! and edges follow their child's id order.

use std::{collections::HashMap, fmt::Write, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;
use vodb_common::VariableSnapshot;

use crate::{node_label, projector::label_parts};

/// Supported text export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// GraphViz DOT
    Dot,
    /// PlantUML object diagram
    PlantUml,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(Self::Dot),
            "plantuml" | "puml" => Ok(Self::PlantUml),
            other => Err(format!("unknown export format `{other}`")),
        }
    }
}

/// Render `snapshot` in the requested format
pub fn export_snapshot(snapshot: &VariableSnapshot, format: ExportFormat) -> String {
    match format {
        ExportFormat::Dot => to_dot(snapshot),
        ExportFormat::PlantUml => to_plantuml(snapshot),
    }
}

/// Render the snapshot as a GraphViz digraph
pub fn to_dot(snapshot: &VariableSnapshot) -> String {
    let mut out = String::from("digraph variables {\n    node [shape=box];\n");

    for variable in snapshot.variables() {
        let _ = write!(
            out,
            "    \"{}\" [label=\"{}\"",
            dot_escape(&variable.id),
            dot_escape(&node_label(variable))
        );
        if let Some(tooltip) = &variable.tooltip {
            let _ = write!(out, ", tooltip=\"{}\"", dot_escape(tooltip));
        }
        out.push_str("];\n");
    }

    for edge in snapshot.edges() {
        let _ = writeln!(
            out,
            "    \"{}\" -> \"{}\" [label=\"{}\"];",
            dot_escape(&edge.parent_id),
            dot_escape(&edge.child_id),
            dot_escape(&edge.relation_name)
        );
    }

    out.push_str("}\n");
    out
}

/// Render the snapshot as a PlantUML object diagram.
///
/// Objects get positional aliases (`n0`, `n1`, ...) since variable ids are
/// not valid PlantUML identifiers in general. Relations whose parent is not
/// part of the snapshot are left out.
pub fn to_plantuml(snapshot: &VariableSnapshot) -> String {
    let aliases: HashMap<&str, String> =
        snapshot.ids().enumerate().map(|(index, id)| (id, format!("n{index}"))).collect();

    let mut out = String::from("@startuml\n");

    for variable in snapshot.variables() {
        let (top_line, body) = label_parts(variable);
        let title = if top_line.is_empty() { &variable.id } else { &top_line };
        let alias = &aliases[variable.id.as_str()];
        let _ = write!(out, "object \"{}\" as {alias}", puml_escape(title));

        match body {
            Some(body) => {
                out.push_str(" {\n");
                for line in body.lines() {
                    let _ = writeln!(out, "  {}", puml_escape_body(line));
                }
                out.push_str("}\n");
            }
            None => out.push('\n'),
        }
    }

    for edge in snapshot.edges() {
        let (Some(from), Some(to)) =
            (aliases.get(edge.parent_id.as_str()), aliases.get(edge.child_id.as_str()))
        else {
            debug!(%edge, "Skipping relation with unknown endpoint in PlantUML export");
            continue;
        };
        let _ = writeln!(out, "{from} --> {to} : {}", puml_escape(&edge.relation_name));
    }

    out.push_str("@enduml\n");
    out
}

fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn puml_escape(text: &str) -> String {
    text.replace('"', "'")
}

// Braces would open or close the object body
fn puml_escape_body(text: &str) -> String {
    text.replace('{', "\\{").replace('}', "\\}")
}
