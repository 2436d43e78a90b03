use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use std::sync::Arc;
use crate::domain::value_objects::UserId;
use crate::presentation::dto::{
    favorite_identifiers, AddFavoriteBody, FavoritesQuery, FavoritesResponse, MessageResponse,
};
use crate::presentation::routes::AppContext;
use crate::shared::error::AppError;
use crate::shared::result::Result;

/// API: 添加收藏（用户 ID 在路径中）
pub async fn add_user_favorite(
    State(ctx): State<Arc<AppContext>>,
    user_id: std::result::Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let Path(user_id) = user_id?;
    let body = AddFavoriteBody::from_bytes(&body)?;
    add(&ctx, Some(user_id), body).await
}

/// API: 添加收藏（用户 ID 在请求体中）
pub async fn add_favorite(
    State(ctx): State<Arc<AppContext>>,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let body = AddFavoriteBody::from_bytes(&body)?;
    let user_id = body.user_id.clone();
    add(&ctx, user_id, body).await
}

/// API: 列出用户收藏（用户 ID 在路径中）
pub async fn list_user_favorites(
    State(ctx): State<Arc<AppContext>>,
    user_id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<FavoritesResponse>> {
    let Path(user_id) = user_id?;
    list(&ctx, Some(user_id)).await
}

/// API: 列出用户收藏（`?userId=`）
pub async fn list_favorites(
    State(ctx): State<Arc<AppContext>>,
    query: std::result::Result<Query<FavoritesQuery>, QueryRejection>,
) -> Result<Json<FavoritesResponse>> {
    let Query(query) = query?;
    list(&ctx, query.user_id).await
}

async fn add(
    ctx: &AppContext,
    user_id: Option<String>,
    body: AddFavoriteBody,
) -> Result<Json<MessageResponse>> {
    let (user_id, repository_id) = favorite_identifiers(user_id, body.repository_id)?;

    let status = ctx.favorites.add_favorite(&user_id, repository_id).await;
    tracing::info!("Favorite {} for user {}: {:?}", repository_id, user_id, status);

    Ok(Json(MessageResponse {
        message: status.message().to_string(),
    }))
}

async fn list(ctx: &AppContext, user_id: Option<String>) -> Result<Json<FavoritesResponse>> {
    let user_id = user_id
        .and_then(|id| UserId::new(id).ok())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;

    let favorites = ctx.favorites.get_favorites(&user_id).await;

    Ok(Json(FavoritesResponse { favorites }))
}
