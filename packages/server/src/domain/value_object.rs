//! Value objects.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Opaque user identifier, taken from the verified token subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub const MAX_LEN: usize = 128;

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyUserId);
        }
        if value.len() > Self::MAX_LEN {
            return Err(ValueObjectError::UserIdTooLong(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hazard record identifier (UUID v4 string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HazardId(String);

impl HazardId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyHazardId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HazardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hazard type tag such as `pothole` or `debris`.
///
/// Tags are compared exactly; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HazardType(String);

impl HazardType {
    pub const MAX_LEN: usize = 64;

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyHazardType);
        }
        if value.len() > Self::MAX_LEN {
            return Err(ValueObjectError::HazardTypeTooLong(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HazardType {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identifies one live socket, so that a superseded session's cleanup can
/// tell whether the registry entry is still its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// The timestamp `millis` earlier, saturating at `i64::MIN`.
    pub fn minus_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_sub(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_rejects_empty_string() {
        // テスト項目: 空文字列の UserId は作成できない
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = UserId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyUserId));
    }

    #[test]
    fn test_user_id_rejects_too_long_value() {
        // テスト項目: 最大長を超える UserId は作成できない
        // given (前提条件):
        let value = "a".repeat(UserId::MAX_LEN + 1);

        // when (操作):
        let result = UserId::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::UserIdTooLong(UserId::MAX_LEN + 1))
        );
    }

    #[test]
    fn test_hazard_type_keeps_exact_tag() {
        // テスト項目: HazardType は大文字小文字を変換せずに保持する
        // given (前提条件):
        let value = "Pothole".to_string();

        // when (操作):
        let hazard_type = HazardType::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(hazard_type.as_str(), "Pothole");
        assert_ne!(hazard_type, HazardType::new("pothole".to_string()).unwrap());
    }

    #[test]
    fn test_hazard_type_rejects_too_long_value() {
        // テスト項目: 最大長を超える HazardType は作成できない
        // given (前提条件):
        let at_limit = "x".repeat(HazardType::MAX_LEN);
        let over_limit = "x".repeat(1024);

        // when (操作):
        let accepted = HazardType::new(at_limit);
        let rejected = HazardType::new(over_limit);

        // then (期待する結果):
        assert!(accepted.is_ok());
        assert_eq!(rejected, Err(ValueObjectError::HazardTypeTooLong(1024)));
    }

    #[test]
    fn test_timestamp_minus_millis() {
        // テスト項目: minus_millis が指定ミリ秒だけ過去の時刻を返す
        // given (前提条件):
        let now = Timestamp::new(1_000_000);

        // when (操作):
        let earlier = now.minus_millis(120_000);

        // then (期待する結果):
        assert_eq!(earlier.value(), 880_000);
        assert!(earlier < now);
    }
}
