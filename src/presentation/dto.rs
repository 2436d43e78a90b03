use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::domain::entities::{SearchFilterRequest, DEFAULT_PAGE, DEFAULT_PER_PAGE};
use crate::domain::value_objects::{RepositoryId, RepositoryIdInput, SortOrder, UserId};
use crate::shared::error::AppError;
use crate::shared::result::Result;

/// `GET /repositories` 查询参数（保留对外的参数名）
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    #[serde(rename = "DateCreate")]
    pub date_create: Option<String>,
    #[serde(rename = "ProgramingLangage")]
    pub language: Option<String>,
    pub order: Option<String>,
}

impl SearchQuery {
    pub fn into_filter(self) -> Result<SearchFilterRequest> {
        let page = parse_positive("page", self.page.as_deref(), DEFAULT_PAGE)?;
        let per_page = parse_positive("per_page", self.per_page.as_deref(), DEFAULT_PER_PAGE)?;

        let order = match non_blank(self.order.as_deref()) {
            Some(order) => order.parse::<SortOrder>().map_err(AppError::Validation)?,
            None => SortOrder::default(),
        };

        let mut request = SearchFilterRequest::new()
            .with_page(page)
            .with_per_page(per_page)
            .with_order(order);

        if let Some(language) = non_blank(self.language.as_deref()) {
            request = request.with_language(language);
        }

        if let Some(date) = non_blank(self.date_create.as_deref()) {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                AppError::Validation(format!("DateCreate must be a date in YYYY-MM-DD format: {}", date))
            })?;
            request = request.with_created_after(date);
        }

        Ok(request)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_positive(name: &str, value: Option<&str>, default: u32) -> Result<u32> {
    match non_blank(value) {
        None => Ok(default),
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(AppError::Validation(format!("{} must be a positive integer", name))),
        },
    }
}

/// 添加收藏请求体
#[derive(Debug, Default, Deserialize)]
pub struct AddFavoriteBody {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "repositoryId")]
    pub repository_id: Option<RepositoryIdInput>,
}

impl AddFavoriteBody {
    /// 空请求体视为所有字段缺失
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))
    }
}

/// 校验并归一化收藏请求的两个字段
pub fn favorite_identifiers(
    user_id: Option<String>,
    repository_id: Option<RepositoryIdInput>,
) -> Result<(UserId, RepositoryId)> {
    let missing = || AppError::Validation("userId and repositoryId are required".to_string());

    let user_id = user_id
        .and_then(|id| UserId::new(id).ok())
        .ok_or_else(missing)?;
    let repository_id = match repository_id {
        Some(RepositoryIdInput::Text(text)) if text.trim().is_empty() => return Err(missing()),
        Some(input) => RepositoryId::try_from(input).map_err(AppError::Validation)?,
        None => return Err(missing()),
    };
    // 0 和负数与缺失同样处理
    if !repository_id.is_valid() {
        return Err(missing());
    }

    Ok((user_id, repository_id))
}

/// `GET /favorites` 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct FavoritesQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<RepositoryId>,
}
