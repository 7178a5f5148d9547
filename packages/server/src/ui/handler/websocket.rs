//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::HeaderMap,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, Coordinate, ErrorCode, ErrorNotice, HazardReport, PushMessage, UserId,
        ValueObjectError,
    },
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
};

use super::bearer_token;

/// Query parameters for WebSocket connection
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// A frame that could not be turned into a command.
#[derive(Debug, Error)]
pub enum InboundError {
    #[error("malformed message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid payload: {0}")]
    Invalid(#[from] ValueObjectError),
}

/// Validated inbound command
#[derive(Debug, PartialEq)]
enum Inbound {
    Location(Option<Coordinate>),
    Report(HazardReport),
}

fn decode_inbound(text: &str) -> Result<Inbound, InboundError> {
    match serde_json::from_str::<ClientMessage>(text)? {
        ClientMessage::LocationUpdate(payload) => Ok(Inbound::Location(payload.coordinate()?)),
        ClientMessage::HazardReport(payload) => Ok(Inbound::Report(payload.try_into()?)),
    }
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let token = query.token.as_deref().or_else(|| bearer_token(&headers));

    match state.connect_user_usecase.authenticate(token) {
        Ok(user_id) => ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)),
        Err(e) => {
            tracing::warn!("Rejecting WebSocket connection: {}", e);
            ws.on_upgrade(reject_socket)
        }
    }
}

/// Close an unauthenticated socket with 1008 before any registry state exists.
async fn reject_socket(mut socket: WebSocket) {
    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: "unauthorized".into(),
    };
    if let Err(e) = socket.send(Message::Close(Some(frame))).await {
        tracing::debug!("Failed to send close frame: {}", e);
    }
}

/// Spawns a task that drains the registry channel into the WebSocket sink.
///
/// The channel ends when the registry drops the sender (disconnect or
/// supersession); the socket is then closed.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!("Stopped pushing to closed socket: {}", e);
                return;
            }
        }
        if let Err(e) = sender.send(Message::Close(None)).await {
            tracing::debug!("Failed to send close frame: {}", e);
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user_id: UserId) {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id: ConnectionId = state
        .connect_user_usecase
        .execute(user_id.clone(), tx)
        .await;

    let (sender, mut receiver) = socket.split();

    let recv_state = state.clone();
    let recv_user = user_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error for '{}': {}", recv_user, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => handle_text(&recv_state, &recv_user, text.as_str()).await,
                Message::Close(_) => {
                    tracing::info!("User '{}' requested close", recv_user);
                    break;
                }
                // Ping/pong is handled by axum
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Single cleanup path for every way a session can end
    state
        .disconnect_user_usecase
        .execute(&user_id, connection_id)
        .await;
}

async fn handle_text(state: &AppState, user_id: &UserId, text: &str) {
    tracing::debug!("Received from '{}': {}", user_id, text);

    match decode_inbound(text) {
        Ok(Inbound::Location(location)) => {
            state
                .update_location_usecase
                .execute(user_id, location)
                .await
        }
        Ok(Inbound::Report(report)) => {
            state
                .report_hazard_usecase
                .execute_from_socket(user_id, report)
                .await
        }
        Err(e) => {
            tracing::warn!("Rejected message from '{}': {}", user_id, e);
            let notice = PushMessage::Error(ErrorNotice {
                code: ErrorCode::MalformedMessage,
                message: e.to_string(),
            });
            state.registry.send(user_id, &notice).await;
        }
    }
}
