use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 用户 ID 值对象（通常是 UUID 字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// 空白字符串不是合法的用户 ID
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("userId is required".to_string());
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 仓库 ID 值对象（GitHub 仓库的数字 ID）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(pub i64);

impl RepositoryId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// GitHub 仓库 ID 均为正数
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

/// 仓库 ID 在边界上既可能是数字也可能是数字字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryIdInput {
    Number(i64),
    Text(String),
}

impl TryFrom<RepositoryIdInput> for RepositoryId {
    type Error = String;

    fn try_from(input: RepositoryIdInput) -> Result<Self, Self::Error> {
        match input {
            RepositoryIdInput::Number(id) => Ok(RepositoryId::new(id)),
            RepositoryIdInput::Text(text) => text.parse(),
        }
    }
}

impl FromStr for RepositoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| format!("Invalid repositoryId: {}", s))
    }
}

impl From<i64> for RepositoryId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid order: {} (expected 'asc' or 'desc')", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_rejects_blank() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
        assert_eq!(UserId::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_repository_id_from_numeric_string() {
        assert_eq!("42".parse::<RepositoryId>().unwrap(), RepositoryId(42));
        assert_eq!(" 7 ".parse::<RepositoryId>().unwrap(), RepositoryId(7));
        assert!("symfony/symfony".parse::<RepositoryId>().is_err());
    }

    #[test]
    fn test_repository_id_input_normalization() {
        let number: RepositoryIdInput = serde_json::from_str("12").unwrap();
        let text: RepositoryIdInput = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(RepositoryId::try_from(number).unwrap(), RepositoryId(12));
        assert_eq!(RepositoryId::try_from(text).unwrap(), RepositoryId(12));
        assert!(RepositoryId::try_from(RepositoryIdInput::Text("abc".into())).is_err());
    }

    #[test]
    fn test_repository_id_validity() {
        assert!(RepositoryId(1).is_valid());
        assert!(!RepositoryId(0).is_valid());
        assert!(!RepositoryId(-3).is_valid());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }
}
