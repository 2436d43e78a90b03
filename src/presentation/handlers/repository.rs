use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use crate::presentation::dto::SearchQuery;
use crate::presentation::routes::AppContext;
use crate::shared::result::Result;

/// API: 搜索 GitHub 仓库，原样返回上游 JSON
pub async fn search_repositories(
    State(ctx): State<Arc<AppContext>>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    let request = query.into_filter()?;

    info!(
        "Searching repositories: q={:?} page={} per_page={} order={}",
        request.query(),
        request.page,
        request.per_page,
        request.order
    );

    let body = ctx.search_client.search(&request).await?;

    Ok(Json(body))
}
