use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::SortOrder;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 50;
/// GitHub 搜索接口单页上限
pub const MAX_PER_PAGE: u32 = 100;

/// 两个过滤条件都缺省时使用的默认子句
pub const DEFAULT_FILTER_CLAUSE: &str = "stars:>=0";

/// 仓库搜索请求（不持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilterRequest {
    pub page: u32,
    pub per_page: u32,
    pub order: SortOrder,
    pub language: Option<String>,
    pub created_after: Option<NaiveDate>,
}

impl Default for SearchFilterRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            order: SortOrder::default(),
            language: None,
            created_after: None,
        }
    }
}

impl SearchFilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// 超过上游上限时截断为 100
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_created_after(mut self, date: NaiveDate) -> Self {
        self.created_after = Some(date);
        self
    }

    /// 构造 `q` 参数的过滤子句
    ///
    /// 语言和日期都没有时只有 `stars:>=0`；只要提供了其中之一，
    /// 就只包含提供的子句，不再附加 `stars:>=0`。
    pub fn filter_clauses(&self) -> Vec<String> {
        if self.language.is_none() && self.created_after.is_none() {
            return vec![DEFAULT_FILTER_CLAUSE.to_string()];
        }

        let mut clauses = Vec::new();
        if let Some(language) = &self.language {
            clauses.push(format!("language:{}", language));
        }
        if let Some(date) = &self.created_after {
            clauses.push(format!("created:>{}", date.format("%Y-%m-%d")));
        }
        clauses
    }

    /// 子句以单个空格拼接
    pub fn query(&self) -> String {
        self.filter_clauses().join(" ")
    }
}

/// 添加收藏的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteStatus {
    Added,
    AlreadyExists,
}

impl FavoriteStatus {
    pub fn message(&self) -> &'static str {
        match self {
            FavoriteStatus::Added => "Repository has been added to favorites.",
            FavoriteStatus::AlreadyExists => "Repository is already in favorites.",
        }
    }
}
