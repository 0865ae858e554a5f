//! 业务逻辑服务模块
//!
//! 封装上游拉取与报价入库流程

pub mod quotation_service; // 报价请求流程
pub mod upstream;          // 上游报价来源

pub use quotation_service::QuotationService;
pub use upstream::{AwesomeApiProvider, QuoteProvider};
