//! 报价客户端
//!
//! 请求一次服务端报价，把买入价写入 context.txt；任何失败都以非零状态退出

use env_logger::Env;

use cotacao::client;
use cotacao::config::AppConfig;

#[tokio::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();
    if let Err(e) = config.validate() {
        log::error!("配置无效: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = client::run(&config.client).await {
        log::error!("获取报价失败: {}", e);
        std::process::exit(1);
    }
}
