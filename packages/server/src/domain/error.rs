//! Domain error types.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueObjectError {
    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("user id is too long ({0} bytes)")]
    UserIdTooLong(usize),

    #[error("hazard type must not be empty")]
    EmptyHazardType,

    #[error("hazard type is too long ({0} bytes)")]
    HazardTypeTooLong(usize),

    #[error("hazard id must not be empty")]
    EmptyHazardId,

    #[error("latitude {0} is out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Hazard store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("hazard '{0}' not found")]
    HazardNotFound(String),

    #[error("hazard store unavailable: {0}")]
    Unavailable(String),
}

/// Socket write errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    #[error("failed to push message to '{0}': channel closed")]
    ChannelClosed(String),

    #[error("failed to encode outbound message: {0}")]
    Encode(String),
}

/// Token verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Photo blob storage errors
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("photo payload is not valid base64: {0}")]
    Decode(String),

    #[error("failed to write photo: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_object_errors_compare_by_value() {
        // テスト項目: 座標を含むエラーも値で比較できる
        // given (前提条件):
        let error = ValueObjectError::LatitudeOutOfRange(91.0);

        // when (操作):
        let copy = error.clone();

        // then (期待する結果):
        assert_eq!(error, copy);
        assert_ne!(error, ValueObjectError::LatitudeOutOfRange(-91.0));
        assert_ne!(error, ValueObjectError::LongitudeOutOfRange(91.0));
        assert_eq!(error.to_string(), "latitude 91 is out of range [-90, 90]");
    }
}
