//! Request handlers.

mod http;
mod websocket;

pub use http::{get_connections, get_stats, health_check, report_hazard};
pub use websocket::websocket_handler;

use axum::http::{HeaderMap, header::AUTHORIZATION};

/// Token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        // テスト項目: Bearer ヘッダーからトークンが取り出される
        // given (前提条件):
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));

        // when (操作):
        let token = bearer_token(&headers);

        // then (期待する結果):
        assert_eq!(token, Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_or_other_scheme() {
        // テスト項目: ヘッダーが無い、または Bearer 以外の場合は None
        // given (前提条件):
        let empty = HeaderMap::new();
        let mut basic = HeaderMap::new();
        basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));

        // when (操作) / then (期待する結果):
        assert_eq!(bearer_token(&empty), None);
        assert_eq!(bearer_token(&basic), None);
    }
}
