//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use roadsafe_server::infrastructure::dto::websocket::ServerMessage;
use roadsafe_shared::time::{get_utc_timestamp, timestamp_to_rfc3339};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::protocol::{Message, frame::coding::CloseCode},
};

use crate::{command::Command, error::ClientError, formatter::MessageFormatter};

use super::ui::{PROMPT, redisplay_prompt};

/// How the read side of a session ended
enum ReadOutcome {
    Closed,
    Rejected(String),
    Lost(String),
}

/// Run one WebSocket client session
///
/// Returns `Ok(())` when the user quits, an error when the connection is lost
/// or the server rejects the token.
pub async fn run_client_session(url: &str, token: &str) -> Result<(), ClientError> {
    let url = format!("{}?token={}", url, token);

    let (ws_stream, _response) = connect_async(&url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to hazard alert server");
    println!("\nConnected. Type 'help' for commands. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(message) => MessageFormatter::format_server_message(&message),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Ok(Message::Close(Some(frame))) if frame.code == CloseCode::Policy => {
                    return ReadOutcome::Rejected(frame.reason.as_str().to_string());
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return ReadOutcome::Closed;
                }
                Err(e) => return ReadOutcome::Lost(e.to_string()),
                _ => {}
            }
        }
        ReadOutcome::Closed
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    tracing::info!("Input closed");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn prompt commands into frames
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("{}", e);
                    redisplay_prompt();
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Help => {
                    print!("{}", MessageFormatter::format_help());
                    redisplay_prompt();
                    continue;
                }
                _ => {}
            }

            let timestamp = timestamp_to_rfc3339(get_utc_timestamp());
            let Some(message) = command.to_message(timestamp) else {
                continue;
            };
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                return Err(e.to_string());
            }
        }

        let _ = write.send(Message::Close(None)).await;
        Ok(())
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            match read_result.unwrap_or(ReadOutcome::Closed) {
                ReadOutcome::Rejected(reason) => Err(ClientError::Unauthorized(reason)),
                ReadOutcome::Lost(e) => Err(ClientError::ConnectionError(e)),
                ReadOutcome::Closed => Err(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )),
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            match write_result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(ClientError::ConnectionError(e)),
                Err(e) => Err(ClientError::ConnectionError(e.to_string())),
            }
        }
    }
}
