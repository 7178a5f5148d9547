//! UseCase: ユーザー接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectUserUseCase::authenticate() / execute() メソッド
//! - トークン検証と、レジストリへのソケット登録
//!
//! ### なぜこのテストが必要か
//! - 不正なトークンでレジストリに登録されないことを保証
//! - 同じユーザーの再接続で古いソケットが置き換えられることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なトークンでの接続
//! - 異常系：トークンなし、期限切れ、不正なトークン
//! - エッジケース：同じユーザーの再接続

use std::sync::Arc;

use crate::domain::{
    AuthError, ConnectionId, ConnectionRegistry, PusherChannel, TokenVerifier, UserId,
};

use super::error::ConnectError;

/// ユーザー接続のユースケース
pub struct ConnectUserUseCase {
    verifier: Arc<dyn TokenVerifier>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectUserUseCase {
    pub fn new(verifier: Arc<dyn TokenVerifier>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { verifier, registry }
    }

    /// トークンを検証し、接続するユーザーを特定する
    ///
    /// # Returns
    ///
    /// * `Ok(UserId)` - トークンの発行先ユーザー
    /// * `Err(ConnectError)` - トークンが無い、または検証に失敗
    pub fn authenticate(&self, token: Option<&str>) -> Result<UserId, ConnectError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        Ok(self.verifier.verify(token)?)
    }

    /// 認証済みユーザーのソケットを登録する
    ///
    /// 既存の接続は置き換えられる。返された ConnectionId は切断時に使う。
    pub async fn execute(&self, user_id: UserId, sender: PusherChannel) -> ConnectionId {
        let connection_id = self.registry.connect(user_id.clone(), sender).await;
        tracing::info!(
            "User '{}' connected ({} active)",
            user_id,
            self.registry.count().await
        );
        connection_id
    }
}
