//! HashMap を使った ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - user id ごとに 1 つのライブソケット（`UnboundedSender`）と最終位置を管理
//! - クライアントへのメッセージ送信（JSON へのエンコードを含む）
//! - 半径検索（`domain::proximity` をロック内で呼び出す）
//!
//! ## 設計ノート
//!
//! ソケットと位置は同じエントリに入っているため、切断はエントリ 1 つの削除で完了します。
//! ロックは `tokio::sync::Mutex` 1 つだけで、保持中に I/O は行いません
//! （`UnboundedSender::send` はブロックしません）。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use roadsafe_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectedUser, ConnectionId, ConnectionRegistry, Coordinate, ProximityMatch,
        ProximityQuery, PushError, PushMessage, PusherChannel, Timestamp, UserId,
        proximity::find_within,
    },
    infrastructure::dto::websocket::ServerMessage,
};

/// インメモリ ConnectionRegistry 実装
pub struct InMemoryConnectionRegistry {
    /// Key: user id, Value: ライブソケットと最終位置
    users: Mutex<HashMap<UserId, ConnectedUser>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryConnectionRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}

/// Encode a push message as a WebSocket text frame payload.
pub fn encode_push_message(message: &PushMessage) -> Result<String, PushError> {
    serde_json::to_string(&ServerMessage::from(message)).map_err(|e| PushError::Encode(e.to_string()))
}

fn push(user_id: &UserId, sender: &PusherChannel, payload: String) -> Result<(), PushError> {
    sender
        .send(payload)
        .map_err(|_| PushError::ChannelClosed(user_id.as_str().to_string()))
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn connect(&self, user_id: UserId, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        let entry = ConnectedUser::new(user_id.clone(), connection_id, sender, self.now());

        let mut users = self.users.lock().await;
        if let Some(previous) = users.insert(user_id.clone(), entry) {
            // dropping the old sender ends the superseded session
            tracing::info!(
                "User '{}' reconnected; superseding connection {}",
                user_id,
                previous.connection_id
            );
        }
        tracing::debug!(
            "User '{}' registered as connection {} ({} total)",
            user_id,
            connection_id,
            users.len()
        );

        connection_id
    }

    async fn disconnect(&self, user_id: &UserId) -> bool {
        let mut users = self.users.lock().await;
        let removed = users.remove(user_id).is_some();
        if removed {
            tracing::debug!("User '{}' unregistered ({} remaining)", user_id, users.len());
        }
        removed
    }

    async fn disconnect_connection(&self, user_id: &UserId, connection_id: ConnectionId) -> bool {
        let mut users = self.users.lock().await;
        match users.get(user_id) {
            Some(entry) if entry.connection_id == connection_id => {
                users.remove(user_id);
                tracing::debug!("User '{}' unregistered ({} remaining)", user_id, users.len());
                true
            }
            Some(_) => {
                tracing::debug!(
                    "Connection {} of '{}' was already superseded; keeping the newer entry",
                    connection_id,
                    user_id
                );
                false
            }
            None => false,
        }
    }

    async fn send(&self, user_id: &UserId, message: &PushMessage) {
        let payload = match encode_push_message(message) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("{}", e);
                return;
            }
        };

        let users = self.users.lock().await;
        let Some(entry) = users.get(user_id) else {
            tracing::debug!("User '{}' not connected, dropping message", user_id);
            return;
        };

        // 送信失敗は記録のみ。切断は行わない
        match push(user_id, &entry.sender, payload) {
            Ok(()) => tracing::debug!("Pushed message to '{}'", user_id),
            Err(e) => tracing::warn!("{}", e),
        }
    }

    async fn update_location(&self, user_id: &UserId, location: Coordinate) -> bool {
        let now = self.now();
        let mut users = self.users.lock().await;
        match users.get_mut(user_id) {
            Some(entry) => {
                entry.update_location(location, now);
                true
            }
            None => false,
        }
    }

    async fn find_nearby(&self, query: &ProximityQuery) -> Vec<ProximityMatch> {
        let users = self.users.lock().await;
        find_within(users.values(), query)
    }

    async fn count(&self) -> usize {
        self.users.lock().await.len()
    }

    async fn snapshot(&self) -> Vec<ConnectedUser> {
        let users = self.users.lock().await;
        let mut entries: Vec<ConnectedUser> = users.values().cloned().collect();
        entries.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        entries
    }
}
