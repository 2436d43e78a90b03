use async_trait::async_trait;
use serde_json::Value;
use crate::domain::entities::SearchFilterRequest;
use crate::shared::result::Result;

/// 仓库搜索网关接口
#[async_trait]
pub trait RepositorySearchPort: Send + Sync {
    /// 执行一次搜索，原样返回上游 JSON
    async fn search(&self, request: &SearchFilterRequest) -> Result<Value>;
}
