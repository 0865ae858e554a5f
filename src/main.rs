//! 报价服务端
//!
//! GET /cotacao：拉取上游 USD-BRL 报价，入库后原样返回

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use cotacao::config::AppConfig;
use cotacao::handlers;
use cotacao::services::{AwesomeApiProvider, QuotationService};
use cotacao::store::SqliteStore;

/// 应用程序入口
///
/// 启动 HTTP 服务器，默认监听 0.0.0.0:8080
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化日志系统，默认日志级别为 info
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();
    config.validate().map_err(std::io::Error::other)?;

    // 连接池随服务端生命周期存在，启动时建表
    let store = SqliteStore::open(&config.store.path, config.store.write_timeout())
        .await
        .map_err(|e| {
            log::error!("打开数据库 {} 失败: {}", config.store.path, e);
            std::io::Error::other(e)
        })?;

    let provider = AwesomeApiProvider::new(
        reqwest::Client::new(),
        config.upstream.url.clone(),
        config.upstream.timeout(),
    );
    let service = web::Data::new(QuotationService::new(Arc::new(provider), Arc::new(store)));

    log::info!("启动报价服务 {}", config.bind_addr());

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // 添加请求日志中间件
            .app_data(service.clone())
            .configure(handlers::config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.bind_addr())?.run().await
}
