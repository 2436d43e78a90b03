use axum::{Router, routing::get};
use axum::http::{HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use crate::ports::favorites::FavoritesPort;
use crate::ports::search::RepositorySearchPort;
use crate::presentation::handlers;
use crate::shared::error::AppError;
use crate::shared::result::Result;

/// 应用状态
pub struct AppContext {
    pub search_client: Arc<dyn RepositorySearchPort>,
    pub favorites: Arc<dyn FavoritesPort>,
}

/// 创建应用路由
pub fn create_app_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))

        // 仓库搜索
        .route("/repositories", get(handlers::repository::search_repositories))

        // 收藏
        .route(
            "/users/{user_id}/favorites",
            get(handlers::favorites::list_user_favorites)
                .post(handlers::favorites::add_user_favorite),
        )
        .route(
            "/favorites",
            get(handlers::favorites::list_favorites).post(handlers::favorites::add_favorite),
        )

        .with_state(ctx)
}

/// 按配置的全部来源构建 CORS 层
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| AppError::Config(format!("Invalid CORS origin: {}", e)))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST]))
}
