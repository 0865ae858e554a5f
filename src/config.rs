//! 配置模块
//!
//! 支持从 JSON 文件加载服务端与客户端配置，缺省值即为固定常量

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// 上游汇率接口
pub const EXCHANGE_RATE_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
/// 服务端对外接口
pub const SERVICE_URL: &str = "http://localhost:8080/cotacao";
/// SQLite 数据库文件
pub const DATABASE_PATH: &str = "./database.db";
/// 客户端输出文件
pub const OUTPUT_PATH: &str = "context.txt";
/// 客户端输出前缀
pub const OUTPUT_LABEL: &str = "Dólar";

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 上游接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub url: String,
    /// 拉取截止时间（毫秒）
    #[serde(default = "default_fetch_timeout")]
    pub timeout_ms: u64,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
    /// 单次写入截止时间（毫秒），偏紧但保留为可配置参数
    #[serde(default = "default_write_timeout")]
    pub write_timeout_ms: u64,
}

/// 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_service_url")]
    pub endpoint: String,
    /// 整体请求截止时间（毫秒），含连接、请求与完整响应体
    #[serde(default = "default_client_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_output_label")]
    pub label: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_upstream_url() -> String { EXCHANGE_RATE_URL.to_string() }
fn default_fetch_timeout() -> u64 { 200 }
fn default_database_path() -> String { DATABASE_PATH.to_string() }
fn default_write_timeout() -> u64 { 10 }
fn default_service_url() -> String { SERVICE_URL.to_string() }
fn default_client_timeout() -> u64 { 300 }
fn default_output_path() -> String { OUTPUT_PATH.to_string() }
fn default_output_label() -> String { OUTPUT_LABEL.to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            timeout_ms: default_fetch_timeout(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            write_timeout_ms: default_write_timeout(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_service_url(),
            timeout_ms: default_client_timeout(),
            output_path: default_output_path(),
            label: default_output_label(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl StoreConfig {
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_path)
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    pub fn load() -> Self {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("从 {} 加载配置成功", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        log::info!("使用默认配置");
        Self::default()
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 校验地址格式与截止时间预算
    ///
    /// 客户端的整体预算必须大于服务端拉取与写入预算之和，否则只告警
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.upstream.url)
            .map_err(|e| anyhow!("上游地址无效 {}: {}", self.upstream.url, e))?;
        Url::parse(&self.client.endpoint)
            .map_err(|e| anyhow!("服务端地址无效 {}: {}", self.client.endpoint, e))?;

        if self.upstream.timeout_ms == 0 || self.store.write_timeout_ms == 0 || self.client.timeout_ms == 0 {
            return Err(anyhow!("截止时间必须大于 0"));
        }

        let inner = self.upstream.timeout_ms + self.store.write_timeout_ms;
        if self.client.timeout_ms <= inner {
            log::warn!(
                "客户端预算 {}ms 未超过服务端内部预算之和 {}ms",
                self.client.timeout_ms,
                inner
            );
        }

        Ok(())
    }
}
