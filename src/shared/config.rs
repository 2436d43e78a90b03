use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use crate::shared::error::AppError;
use crate::shared::result::Result;

/// 默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub github: GithubConfig,
    pub favorites: FavoritesConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// GitHub 搜索接口配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    pub user_agent: String,
    /// 存放 Bearer token 的环境变量名
    pub token_env: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            user_agent: "repofinder".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

impl GithubConfig {
    /// 从环境变量读取 token，空值视为未配置
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

/// 收藏持久化配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FavoritesConfig {
    pub persist: bool,
    pub path: PathBuf,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            persist: true,
            path: PathBuf::from("favorites.json"),
        }
    }
}

impl FavoritesConfig {
    /// 需要持久化时返回文件路径
    pub fn storage_path(&self) -> Option<&Path> {
        self.persist.then_some(self.path.as_path())
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// 从命令行参数和文件加载配置
    pub fn from_args_and_file(
        config_path: Option<PathBuf>,
        bind_address: Option<SocketAddr>,
        favorites_path: Option<PathBuf>,
        no_persist: bool,
    ) -> Result<Self> {
        let mut config = match config_path {
            // 显式指定的配置文件必须能读取
            Some(path) => Self::from_file(&path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        // 命令行参数覆盖配置文件
        if let Some(addr) = bind_address {
            config.server.bind_address = addr;
        }
        if let Some(path) = favorites_path {
            config.favorites.path = path;
        }
        if no_persist {
            config.favorites.persist = false;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = Config::from_toml_str(
            r#"
            [github]
            user_agent = "my-agent"

            [favorites]
            path = "var/favs.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.github.user_agent, "my-agent");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.favorites.path, PathBuf::from("var/favs.json"));
        assert!(config.favorites.persist);
        assert_eq!(config.server.bind_address.port(), 8080);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("server = 3").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbind_address = \"0.0.0.0:9000\"\n").unwrap();

        let config = Config::from_args_and_file(
            Some(path),
            Some("127.0.0.1:7000".parse().unwrap()),
            Some(PathBuf::from("other.json")),
            true,
        )
        .unwrap();

        assert_eq!(config.server.bind_address.port(), 7000);
        assert_eq!(config.favorites.path, PathBuf::from("other.json"));
        assert!(config.favorites.storage_path().is_none());
    }

    #[test]
    fn test_missing_explicit_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_args_and_file(
            Some(dir.path().join("missing.toml")),
            None,
            None,
            false,
        );
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
