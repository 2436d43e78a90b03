use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use crate::domain::value_objects::{RepositoryId, RepositoryIdInput, UserId};
use crate::shared::result::Result;

/// 用户 -> 收藏仓库列表
pub type FavoritesMap = BTreeMap<UserId, Vec<RepositoryId>>;

/// 读取收藏文件；文件不存在或顶层不是 JSON 对象时返回空映射
pub async fn read_favorites_file(path: &Path) -> FavoritesMap {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("Favorites file {} not found, starting empty", path.display());
            return FavoritesMap::new();
        }
        Err(e) => {
            warn!("Failed to read favorites file {}: {}", path.display(), e);
            return FavoritesMap::new();
        }
    };

    match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
        Ok(raw) => normalize_favorites(raw),
        Err(e) => {
            warn!("Ignoring unparseable favorites file {}: {}", path.display(), e);
            FavoritesMap::new()
        }
    }
}

/// 逐条校验文件内容：ID 归一化为整数，按首次出现去重，坏条目跳过
pub fn normalize_favorites(raw: BTreeMap<String, Value>) -> FavoritesMap {
    let mut favorites = FavoritesMap::new();

    for (user, entries) in raw {
        let user_id = match UserId::new(user.as_str()) {
            Ok(user_id) => user_id,
            Err(_) => {
                warn!("Skipping favorites stored under a blank user id");
                continue;
            }
        };

        let Value::Array(entries) = entries else {
            warn!("Skipping favorites of user {}: not an array", user_id);
            continue;
        };

        let mut list: Vec<RepositoryId> = Vec::with_capacity(entries.len());
        for entry in entries {
            let repository_id = serde_json::from_value::<RepositoryIdInput>(entry.clone())
                .map_err(|e| e.to_string())
                .and_then(RepositoryId::try_from);

            match repository_id {
                Ok(id) if id.is_valid() => {
                    if !list.contains(&id) {
                        list.push(id);
                    }
                }
                _ => warn!("Skipping invalid repository id {} for user {}", entry, user_id),
            }
        }

        favorites.insert(user_id, list);
    }

    favorites
}

/// 以格式化 JSON（UTF-8）整体写入收藏文件，先写临时文件再原子替换
pub async fn write_favorites_file(path: &Path, favorites: &FavoritesMap) -> Result<()> {
    // 确保父目录存在
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let content = serde_json::to_string_pretty(favorites)?;
    let tmp_path = temp_path(path);
    tokio::fs::write(&tmp_path, content).await?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
