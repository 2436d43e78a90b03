use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::debug;
use crate::domain::entities::SearchFilterRequest;
use crate::ports::search::RepositorySearchPort;
use crate::shared::config::GithubConfig;
use crate::shared::error::AppError;
use crate::shared::result::Result;

pub const GITHUB_JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const SEARCH_PATH: &str = "/search/repositories";

/// GitHub 仓库搜索客户端（基于 reqwest）
pub struct GithubSearchClient {
    client: reqwest::Client,
    search_url: String,
    token: Option<String>,
}

impl GithubSearchClient {
    pub fn new(config: &GithubConfig, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            search_url: format!("{}{}", config.api_url.trim_end_matches('/'), SEARCH_PATH),
            token,
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    fn query_params(request: &SearchFilterRequest) -> Vec<(&'static str, String)> {
        vec![
            ("q", request.query()),
            ("sort", "stars".to_string()),
            ("order", request.order.to_string()),
            ("per_page", request.per_page.to_string()),
            ("page", request.page.to_string()),
        ]
    }
}

#[async_trait]
impl RepositorySearchPort for GithubSearchClient {
    async fn search(&self, request: &SearchFilterRequest) -> Result<Value> {
        let params = Self::query_params(request);
        debug!("Searching GitHub repositories: {:?}", params);

        let mut builder = self
            .client
            .get(&self.search_url)
            .query(&params)
            .header(ACCEPT, GITHUB_JSON_MEDIA_TYPE);

        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        // 网络错误、非 2xx 和解码失败都统一为 Gateway 错误
        let value = builder
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Query, State},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Json},
        routing::get,
        Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Received {
        query: HashMap<String, String>,
        headers: HashMap<String, String>,
    }

    type Shared = Arc<Mutex<Received>>;

    fn upstream_payload() -> Value {
        json!({
            "total_count": 1000,
            "incomplete_results": false,
            "items": [
                { "id": 1, "full_name": "repo/name1" },
                { "id": 2, "full_name": "repo/name2" }
            ]
        })
    }

    async fn fake_search(
        State(received): State<Shared>,
        Query(query): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> Json<Value> {
        let mut guard = received.lock().unwrap();
        guard.query = query;
        guard.headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        Json(upstream_payload())
    }

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config_for(api_url: String) -> GithubConfig {
        GithubConfig {
            api_url,
            user_agent: "repofinder-test".to_string(),
            ..GithubConfig::default()
        }
    }

    #[tokio::test]
    async fn test_search_passes_params_and_returns_body_verbatim() {
        let received: Shared = Arc::default();
        let router = Router::new()
            .route("/search/repositories", get(fake_search))
            .with_state(received.clone());
        let api_url = spawn_upstream(router).await;

        let client =
            GithubSearchClient::new(&config_for(api_url), Some("secret".to_string())).unwrap();
        let request = SearchFilterRequest::new()
            .with_page(3)
            .with_per_page(10)
            .with_language("PHP");

        let body = client.search(&request).await.unwrap();
        assert_eq!(body, upstream_payload());

        let guard = received.lock().unwrap();
        assert_eq!(guard.query["page"], "3");
        assert_eq!(guard.query["per_page"], "10");
        assert_eq!(guard.query["order"], "desc");
        assert_eq!(guard.query["sort"], "stars");
        assert!(guard.query["q"].contains("language:PHP"));
        assert_eq!(guard.headers["accept"], GITHUB_JSON_MEDIA_TYPE);
        assert_eq!(guard.headers["user-agent"], "repofinder-test");
        assert_eq!(guard.headers["authorization"], "Bearer secret");
    }

    #[tokio::test]
    async fn test_search_without_token_sends_no_authorization() {
        let received: Shared = Arc::default();
        let router = Router::new()
            .route("/search/repositories", get(fake_search))
            .with_state(received.clone());
        let api_url = spawn_upstream(router).await;

        let client = GithubSearchClient::new(&config_for(api_url), None).unwrap();
        client.search(&SearchFilterRequest::new()).await.unwrap();

        let guard = received.lock().unwrap();
        assert_eq!(guard.query["q"], "stars:>=0");
        assert!(!guard.headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_gateway_error() {
        let router = Router::new().route(
            "/search/repositories",
            get(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "message": "Validation Failed" })),
                )
            }),
        );
        let api_url = spawn_upstream(router).await;

        let client = GithubSearchClient::new(&config_for(api_url), None).unwrap();
        let err = client.search(&SearchFilterRequest::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Gateway(_)));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_gateway_error() {
        let router = Router::new().route(
            "/search/repositories",
            get(|| async { "not json".into_response() }),
        );
        let api_url = spawn_upstream(router).await;

        let client = GithubSearchClient::new(&config_for(api_url), None).unwrap();
        let err = client.search(&SearchFilterRequest::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Gateway(_)));
    }

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let client =
            GithubSearchClient::new(&config_for("https://api.github.com/".into()), None).unwrap();
        assert_eq!(client.search_url(), "https://api.github.com/search/repositories");
    }
}
