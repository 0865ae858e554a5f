//! 阶段截止时间
//!
//! 每个阶段独立计时，超时即丢弃进行中的 future，不做重试

use std::future::Future;
use std::time::Duration;

use crate::error::{QuoteError, QuoteResult, Stage};

/// 在 `budget` 内完成 `fut`，否则返回 `QuoteError::Timeout`
///
/// 超时后 `fut` 被丢弃，其持有的连接、事务等资源随之释放
pub async fn with_deadline<T, F>(stage: Stage, budget: Duration, fut: F) -> QuoteResult<T>
where
    F: Future<Output = QuoteResult<T>>,
{
    match tokio::time::timeout(budget, fut).await {
        Ok(result) => result,
        Err(_) => Err(QuoteError::Timeout { stage, budget }),
    }
}
