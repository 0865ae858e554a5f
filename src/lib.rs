//! 美元兑雷亚尔报价服务与客户端
//!
//! 服务端每次请求拉取一次上游报价并入库，客户端请求服务端并写入本地文件。
//! 链路上每一跳的截止时间都严格小于调用方：客户端 300ms，上游拉取 200ms，入库 10ms

pub mod client;   // 下游客户端
pub mod config;   // 配置
pub mod deadline; // 阶段截止时间
pub mod error;    // 错误类型
pub mod handlers; // HTTP 请求处理器
pub mod models;   // 数据模型定义
pub mod services; // 业务逻辑服务
pub mod store;    // 报价存储

#[cfg(test)]
pub(crate) mod testing;

pub use error::{QuoteError, QuoteResult};
