use tracing::{info, warn};
use crate::infrastructure::favorites::InMemoryFavoritesStore;

/// 等待 Ctrl+C 或 SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, cleaning up...");
}

/// 关闭时写回收藏；失败只记录日志，不中断关闭流程
pub async fn persist_favorites(store: &InMemoryFavoritesStore) {
    if store.storage_path().is_none() {
        return;
    }

    info!("Flushing favorites...");
    if let Err(e) = store.flush().await {
        warn!("Failed to flush favorites during shutdown: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{RepositoryId, UserId};
    use crate::ports::favorites::FavoritesPort;

    #[tokio::test]
    async fn test_persist_favorites_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        let store = InMemoryFavoritesStore::with_storage(&path);
        store.add_favorite(&UserId::new("u").unwrap(), RepositoryId(1)).await;

        persist_favorites(&store).await;

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({ "u": [1] }));
    }

    #[tokio::test]
    async fn test_persist_favorites_survives_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        // 父路径是普通文件，无法创建目录
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = InMemoryFavoritesStore::with_storage(blocker.join("favorites.json"));
        store.add_favorite(&UserId::new("u").unwrap(), RepositoryId(1)).await;

        persist_favorites(&store).await;
        assert!(blocker.is_file());
    }
}
