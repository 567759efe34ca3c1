//! WebSocket transport for the change feed.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tracing::{debug, warn};

use crate::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Forward change events to one client until either side goes away.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let mut connection = state.connections.connect();
    let observer = connection.id();
    let (mut sender, mut receiver) = socket.split();

    {
        let send_loop = async {
            while let Some(event) = connection.next_event().await {
                let json = match serde_json::to_string(&*event) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(observer = %observer, error = %e, "Failed to encode change event");
                        continue;
                    }
                };
                if sender.send(Message::Text(json.into())).await.is_err() {
                    debug!(observer = %observer, "WebSocket send failed, client disconnected");
                    break;
                }
            }
        };

        // Client text is ignored; only close frames matter.
        let recv_loop = async {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        debug!(observer = %observer, "Ignoring client message: {}", text.as_str());
                    }
                    Message::Close(_) => {
                        debug!(observer = %observer, "WebSocket client sent close frame");
                        break;
                    }
                    _ => {}
                }
            }
        };

        tokio::select! {
            _ = send_loop => {},
            _ = recv_loop => {},
        }
    }

    connection.disconnect();
}
