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

use tracing::info;
use vodb_common::{EdgeKey, NodeKind, SnapshotError, Variable, VariableSnapshot};

const SNAPSHOT: &str = r#"[
    {
        "id": "variable_head",
        "name": "head",
        "type": "Node*",
        "primitiveValues": [{"type": "int", "name": "val", "value": "1"}]
    },
    {
        "id": "object_0x10",
        "name": "Node",
        "type": "Node",
        "tooltip": "0x10",
        "incomingRelations": [{"parentId": "variable_head", "relationName": "*"}]
    },
    {
        "id": "null_0x10_next",
        "incomingRelations": [{"parentId": "object_0x10", "relationName": "next"}]
    }
]"#;

#[test]
fn test_parse_debugger_snapshot() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");

    let snapshot: VariableSnapshot = serde_json::from_str(SNAPSHOT).unwrap();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(NodeKind::of("variable_head"), NodeKind::Variable);
    assert_eq!(NodeKind::of("object_0x10"), NodeKind::Object);
    assert_eq!(NodeKind::of("null_0x10_next"), NodeKind::Null);

    let head = snapshot.get("variable_head").unwrap();
    assert_eq!(head.ty, "Node*");
    assert_eq!(head.primitive_values.len(), 1);

    let edges: Vec<EdgeKey> = snapshot.edges().collect();
    assert_eq!(
        edges,
        vec![
            EdgeKey::new("object_0x10", "null_0x10_next", "next"),
            EdgeKey::new("variable_head", "object_0x10", "*"),
        ]
    );
}

#[test]
fn test_snapshot_serializes_as_list() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");

    let snapshot =
        VariableSnapshot::from_variables([Variable::new("b"), Variable::new("a")]).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json, serde_json::json!([
        {"id": "a", "name": "", "type": ""},
        {"id": "b", "name": "", "type": ""}
    ]));
}

#[test]
fn test_duplicate_ids_are_rejected() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");

    let err = VariableSnapshot::from_variables([Variable::new("a"), Variable::new("a")])
        .unwrap_err();
    assert!(matches!(err, SnapshotError::DuplicateVariable(ref id) if id == "a"));
}
