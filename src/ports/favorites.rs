use async_trait::async_trait;
use crate::domain::entities::FavoriteStatus;
use crate::domain::value_objects::{RepositoryId, UserId};

/// 收藏存储接口
#[async_trait]
pub trait FavoritesPort: Send + Sync {
    /// 添加收藏（幂等）
    async fn add_favorite(&self, user_id: &UserId, repository_id: RepositoryId) -> FavoriteStatus;

    /// 获取用户收藏，未知用户返回空列表
    async fn get_favorites(&self, user_id: &UserId) -> Vec<RepositoryId>;
}
