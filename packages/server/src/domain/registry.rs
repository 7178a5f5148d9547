//! ConnectionRegistry trait 定義
//!
//! ライブソケットと最終位置を user id ごとに 1 つだけ保持するレジストリの
//! インターフェース。具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    entity::ConnectedUser,
    geo::Coordinate,
    message::PushMessage,
    proximity::{ProximityMatch, ProximityQuery},
    value_object::{ConnectionId, UserId},
};

/// Outbound channel of one socket. The session task drains it into the
/// WebSocket sink; dropping the sender ends that session.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Live connection registry
///
/// All operations are atomic with respect to each other: a query never sees a
/// location without its socket or a half-written coordinate.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Register `sender` as the live socket of `user_id`.
    ///
    /// A previous entry for the same user is replaced and its sender dropped.
    async fn connect(&self, user_id: UserId, sender: PusherChannel) -> ConnectionId;

    /// Remove the user's socket and location in one step.
    async fn disconnect(&self, user_id: &UserId) -> bool;

    /// Like [`ConnectionRegistry::disconnect`], but only if the entry still
    /// belongs to `connection_id`.
    async fn disconnect_connection(&self, user_id: &UserId, connection_id: ConnectionId) -> bool;

    /// Deliver `message` to the user's socket.
    ///
    /// A missing recipient is a no-op and a failed write is logged; neither
    /// is reported to the caller and neither disconnects the user.
    async fn send(&self, user_id: &UserId, message: &PushMessage);

    /// Overwrite the user's last known location. No-op if not connected.
    async fn update_location(&self, user_id: &UserId, location: Coordinate) -> bool;

    /// Connected users with a known location inside the query radius.
    async fn find_nearby(&self, query: &ProximityQuery) -> Vec<ProximityMatch>;

    /// Number of live connections
    async fn count(&self) -> usize;

    /// Snapshot of all entries, sorted by user id
    async fn snapshot(&self) -> Vec<ConnectedUser>;
}
