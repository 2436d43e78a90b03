use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::domain::entities::FavoriteStatus;
use crate::domain::value_objects::{RepositoryId, UserId};
use crate::infrastructure::favorites::file::{read_favorites_file, write_favorites_file, FavoritesMap};
use crate::ports::favorites::FavoritesPort;
use crate::shared::result::Result;

/// 内存收藏存储，可选在启动/关闭时与 JSON 文件同步
pub struct InMemoryFavoritesStore {
    favorites: RwLock<FavoritesMap>,
    storage_path: Option<PathBuf>,
}

impl InMemoryFavoritesStore {
    /// 纯内存存储，不落盘
    pub fn new() -> Self {
        Self {
            favorites: RwLock::new(FavoritesMap::new()),
            storage_path: None,
        }
    }

    /// 绑定到文件，需显式调用 `load` / `flush`
    pub fn with_storage(path: impl Into<PathBuf>) -> Self {
        Self {
            favorites: RwLock::new(FavoritesMap::new()),
            storage_path: Some(path.into()),
        }
    }

    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }

    /// 从文件加载完整映射，替换内存中的内容
    pub async fn load(&self) -> usize {
        let Some(path) = &self.storage_path else {
            return 0;
        };

        let loaded = read_favorites_file(path).await;
        let users = loaded.len();
        *self.favorites.write().await = loaded;

        info!("Loaded favorites for {} users from {}", users, path.display());
        users
    }

    /// 将完整映射写回文件
    pub async fn flush(&self) -> Result<()> {
        let Some(path) = &self.storage_path else {
            return Ok(());
        };

        let favorites = self.favorites.read().await;
        write_favorites_file(path, &favorites).await?;

        info!("Flushed favorites for {} users to {}", favorites.len(), path.display());
        Ok(())
    }
}

impl Default for InMemoryFavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FavoritesPort for InMemoryFavoritesStore {
    async fn add_favorite(&self, user_id: &UserId, repository_id: RepositoryId) -> FavoriteStatus {
        let mut favorites = self.favorites.write().await;
        let list = favorites.entry(user_id.clone()).or_default();

        if list.contains(&repository_id) {
            debug!("Repository {} already favorited by {}", repository_id, user_id);
            return FavoriteStatus::AlreadyExists;
        }

        list.push(repository_id);
        debug!("Repository {} favorited by {}", repository_id, user_id);
        FavoriteStatus::Added
    }

    async fn get_favorites(&self, user_id: &UserId) -> Vec<RepositoryId> {
        self.favorites
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }
}
