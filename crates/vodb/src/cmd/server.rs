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

//! WebSocket server command - one panel session per connection

use std::{future::Future, net::SocketAddr};

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
    routing::get,
    Router,
};
use eyre::{Result, WrapErr};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tracing::{debug, error, info};
use vodb_engine::{EngineConfig, PanelSession};

use crate::ws_protocol::{PanelRequest, PanelResponse};

/// Start the WebSocket server and run it until Ctrl+C
pub async fn start_server(ws_port: u16, config: EngineConfig) -> Result<()> {
    info!("Starting VODB WebSocket server on port {}", ws_port);

    let addr = SocketAddr::from(([127, 0, 0, 1], ws_port));
    let listener =
        TcpListener::bind(addr).await.wrap_err_with(|| format!("failed to bind {addr}"))?;

    serve_with_listener(listener, config, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl+C, shutting down...");
    })
    .await
}

/// Serve panels on an already bound listener until `shutdown` resolves
pub async fn serve_with_listener(
    listener: TcpListener,
    config: EngineConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = Router::new().route("/", get(ws_handler)).with_state(config);

    info!("WebSocket server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    Ok(())
}

/// WebSocket upgrade handler
async fn ws_handler(ws: WebSocketUpgrade, State(config): State<EngineConfig>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, config))
}

/// Handle a WebSocket connection
async fn handle_socket(socket: WebSocket, config: EngineConfig) {
    let (mut sender, mut receiver) = socket.split();
    let mut session = PanelSession::new(config);
    info!("Panel connected");

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
        };

        // Only handle text messages
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => {
                info!("Client closed connection");
                break;
            }
            _ => continue,
        };

        let response = match serde_json::from_str::<PanelRequest>(&text) {
            Ok(request) => {
                debug!(?request, "Received panel request");
                PanelResponse::ok(request.apply(&mut session))
            }
            Err(e) => {
                error!("Failed to parse panel request: {}", e);
                PanelResponse::error(format!("Invalid request: {e}"))
            }
        };

        let json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                continue;
            }
        };
        if let Err(e) = sender.send(Message::Text(json.into())).await {
            error!("Failed to send response: {}", e);
            break;
        }
    }

    session.teardown();
    info!("Panel torn down");
}
