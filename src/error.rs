//! 错误类型
//!
//! 服务端与客户端共用同一个 `QuoteError`，每个变体对应链路中的一类失败

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// 链路中受截止时间约束的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 服务端向上游拉取报价
    Fetch,
    /// 服务端写入存储
    Persist,
    /// 客户端请求服务端
    Request,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Persist => "persist",
            Stage::Request => "request",
        };
        f.write_str(name)
    }
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum QuoteError {
    /// 阶段超出截止时间，进行中的操作已被取消
    #[error("{stage} stage exceeded its {budget:?} deadline")]
    Timeout { stage: Stage, budget: Duration },

    /// 网络层失败（连接、发送、读取响应体）
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON 格式不符
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// 无法获取存储连接或开启事务
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    /// 写入失败（数据库语句或客户端输出文件）
    #[error("persistence error on {target}: {source}")]
    Persistence {
        target: String,
        #[source]
        source: BoxError,
    },

    /// 对端返回非 2xx 状态
    #[error("unexpected status code: {status}, body: {body}")]
    UpstreamStatus { status: u16, body: String },
}

impl QuoteError {
    pub fn persistence(target: impl Into<String>, source: impl Into<BoxError>) -> Self {
        QuoteError::Persistence {
            target: target.into(),
            source: source.into(),
        }
    }
}

pub type QuoteResult<T> = Result<T, QuoteError>;
