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

//! Replay command - drive one panel from a JSON-lines request script

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use eyre::{Result, WrapErr};
use tracing::{debug, info, warn};
use vodb_engine::{EngineConfig, PanelSession, RenderedGraph};

use crate::ws_protocol::PanelRequest;

/// Replay the script at `path` and print one renderer command per request
pub fn replay_script(path: &Path, config: &EngineConfig, summary: bool) -> Result<()> {
    let script = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read script {}", path.display()))?;

    let mut session = PanelSession::new(config.clone());
    let stdout = io::stdout();
    let graph = replay_requests(&script, &mut session, &mut stdout.lock())?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        history = session.history_len(),
        "Replay finished"
    );

    if summary {
        eprintln!("{}", summarize(&graph, &session));
    }

    Ok(())
}

/// One-line description of what the panel shows after a replay
pub fn summarize(graph: &RenderedGraph, session: &PanelSession) -> String {
    let dangling = graph.dangling_edges().map(|(id, _)| id).collect::<Vec<_>>();
    if !dangling.is_empty() {
        warn!(?dangling, "Edges point at variables that are not displayed");
    }

    format!(
        "nodes: {}, edges: {}, history: {}, cursor: {:?}, live: {}, variables: {}, dangling edges: {}",
        graph.node_count(),
        graph.edge_count(),
        session.history_len(),
        session.cursor(),
        session.is_live(),
        session.current_snapshot().map_or(0, |snapshot| snapshot.len()),
        dangling.len()
    )
}

/// Apply every request in `script` to `session`, writing each command as a JSON line to `out`
///
/// Blank lines are skipped. Returns the graph a renderer would show after the
/// last request.
pub fn replay_requests(
    script: &str,
    session: &mut PanelSession,
    out: &mut impl Write,
) -> Result<RenderedGraph> {
    let mut graph = RenderedGraph::new();

    for (index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: PanelRequest = serde_json::from_str(line)
            .wrap_err_with(|| format!("invalid request on line {}", index + 1))?;
        debug!(line = index + 1, ?request, "Applying request");

        let command = request.apply(session);
        graph.apply_command(&command);
        writeln!(out, "{}", serde_json::to_string(&command)?)?;
    }

    Ok(graph)
}
