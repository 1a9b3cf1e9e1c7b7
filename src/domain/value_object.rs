//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a user name in bytes.
pub const USER_NAME_MAX_LEN: usize = 100;

/// Group name length bounds in bytes (after trimming).
pub const GROUP_NAME_MIN_LEN: usize = 3;
pub const GROUP_NAME_MAX_LEN: usize = 30;

/// Maximum length of a message content in bytes.
pub const MESSAGE_CONTENT_MAX_LEN: usize = 10000;

/// Minimum age allowed to register.
pub const MIN_AGE: u32 = 13;

/// User name value object.
///
/// A user's unique key across the identity store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new UserName.
    ///
    /// # Returns
    ///
    /// A Result containing the UserName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::UserNameEmpty);
        }
        let len = name.len();
        if len > USER_NAME_MAX_LEN {
            return Err(ValueObjectError::UserNameTooLong {
                max: USER_NAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group name value object.
///
/// Group names are trimmed on creation and must be 3–30 bytes long.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupName(String);

impl GroupName {
    /// Create a new GroupName. Leading and trailing whitespace is trimmed
    /// before validation.
    ///
    /// # Returns
    ///
    /// A Result containing the GroupName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let trimmed = name.trim();
        let len = trimmed.len();
        if !(GROUP_NAME_MIN_LEN..=GROUP_NAME_MAX_LEN).contains(&len) {
            return Err(ValueObjectError::GroupNameLength {
                min: GROUP_NAME_MIN_LEN,
                max: GROUP_NAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    ///
    /// # Returns
    ///
    /// A Result containing the MessageContent or an error if validation fails
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        if content.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        let len = content.len();
        if len > MESSAGE_CONTENT_MAX_LEN {
            return Err(ValueObjectError::MessageContentTooLong {
                max: MESSAGE_CONTENT_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(content))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age value object.
///
/// Registration requires a minimum age of 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Age(u32);

impl Age {
    /// Create a new Age.
    ///
    /// # Returns
    ///
    /// A Result containing the Age or an error if below the minimum
    pub fn new(age: u32) -> Result<Self, ValueObjectError> {
        if age < MIN_AGE {
            return Err(ValueObjectError::AgeBelowMinimum {
                min: MIN_AGE,
                actual: age,
            });
        }
        Ok(Self(age))
    }

    /// Get the inner u32 value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_new_success() {
        // テスト項目: 有効なユーザー名を作成できる
        // given (前提条件):
        let name = "alice".to_string();

        // when (操作):
        let result = UserName::new(name);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_user_name_new_empty_fails() {
        // テスト項目: 空のユーザー名は作成できない
        // when (操作):
        let result = UserName::new("".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::UserNameEmpty);
    }

    #[test]
    fn test_user_name_new_too_long_fails() {
        // テスト項目: 101 文字以上のユーザー名は作成できない
        // when (操作):
        let result = UserName::new("a".repeat(101));

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::UserNameTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_group_name_new_success() {
        // テスト項目: 有効なグループ名を作成できる
        // when (操作):
        let result = GroupName::new("book-club".to_string());

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "book-club");
    }

    #[test]
    fn test_group_name_new_trims_whitespace() {
        // テスト項目: グループ名の前後の空白はトリムされる
        // when (操作):
        let result = GroupName::new("  book-club  ".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "book-club");
    }

    #[test]
    fn test_group_name_new_too_short_fails() {
        // テスト項目: 3 文字未満のグループ名は作成できない
        // when (操作):
        let result = GroupName::new("ab".to_string());

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::GroupNameLength {
                min: 3,
                max: 30,
                actual: 2
            }
        );
    }

    #[test]
    fn test_group_name_new_too_long_fails() {
        // テスト項目: 31 文字以上のグループ名は作成できない
        // when (操作):
        let result = GroupName::new("g".repeat(31));

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::GroupNameLength {
                min: 3,
                max: 30,
                actual: 31
            }
        );
    }

    #[test]
    fn test_group_name_whitespace_only_fails() {
        // テスト項目: 空白のみのグループ名はトリム後に長さ検証で弾かれる
        // when (操作):
        let result = GroupName::new("     ".to_string());

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_message_content_new_success() {
        // テスト項目: 有効なメッセージ内容を作成できる
        // when (操作):
        let result = MessageContent::new("Hello, world!".to_string());

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "Hello, world!");
    }

    #[test]
    fn test_message_content_new_empty_fails() {
        // テスト項目: 空のメッセージ内容は作成できない
        // when (操作):
        let result = MessageContent::new("".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::MessageContentEmpty);
    }

    #[test]
    fn test_message_content_new_too_long_fails() {
        // テスト項目: 10001 文字以上のメッセージ内容は作成できない
        // when (操作):
        let result = MessageContent::new("a".repeat(10001));

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::MessageContentTooLong {
                max: 10000,
                actual: 10001
            }
        );
    }

    #[test]
    fn test_age_new_success() {
        // テスト項目: 13 歳以上の年齢を作成できる
        // when (操作):
        let result = Age::new(13);

        // then (期待する結果):
        assert_eq!(result.unwrap().value(), 13);
    }

    #[test]
    fn test_age_new_below_minimum_fails() {
        // テスト項目: 13 歳未満の年齢は作成できない
        // when (操作):
        let result = Age::new(12);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::AgeBelowMinimum { min: 13, actual: 12 }
        );
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: タイムスタンプは順序付けできる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then (期待する結果):
        assert!(ts1 < ts2);
        assert!(ts2 > ts1);
    }
}
