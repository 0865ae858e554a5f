use actix_web::{web, HttpResponse};

use crate::services::QuotationService;

/// 所有内部失败共用的对外提示，不暴露上游或存储细节
pub const SERVER_ERROR_MESSAGE: &str =
    "A server error has occurred. We will resolve it as quickly as possible!";

pub async fn get_quotation(service: web::Data<QuotationService>) -> HttpResponse {
    match service.current_quotation().await {
        Ok(quotation) => HttpResponse::Ok().json(quotation),
        Err(e) => {
            log::error!("获取报价失败: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(SERVER_ERROR_MESSAGE)
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/cotacao", web::get().to(get_quotation));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use crate::models::sample_quotation;
    use crate::services::quotation_service::tests::FakeProvider;
    use crate::services::{AwesomeApiProvider, QuoteProvider};
    use crate::store::SqliteStore;
    use crate::testing::{spawn_http, temp_path};
    use sqlx::sqlite::SqliteConnectOptions;
    use sqlx::{Connection, SqliteConnection};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;

    const UPSTREAM_BODY: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.4412","low":"5.3869","varBid":"0.0213","pctChange":"0.39","bid":"5.4301","ask":"5.4311","timestamp":"1718395198","create_date":"2024-06-14 16:59:58"}}"#;

    async fn store() -> Arc<SqliteStore> {
        Arc::new(SqliteStore::in_memory(Duration::from_secs(2)).await.unwrap())
    }

    async fn call(provider: Arc<dyn QuoteProvider>, store: Arc<SqliteStore>) -> (StatusCode, Vec<u8>) {
        let service = web::Data::new(QuotationService::new(provider, store));
        let app = test::init_service(App::new().app_data(service).configure(config)).await;

        let req = test::TestRequest::get().uri("/cotacao").to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, body.to_vec())
    }

    // ==================== 成功路径 ====================

    /// 测试响应字段与上游 USDBRL 对象逐一相同
    #[actix_web::test]
    async fn test_response_passes_upstream_object_through() {
        let url = spawn_http(200, UPSTREAM_BODY, Duration::ZERO).await;
        let provider = Arc::new(AwesomeApiProvider::new(reqwest::Client::new(), url, Duration::from_secs(2)));
        let store = store().await;

        let (status, body) = call(provider, store.clone()).await;

        assert_eq!(status, StatusCode::OK);
        let upstream: Value = serde_json::from_str(UPSTREAM_BODY).unwrap();
        let served: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(served, upstream["USDBRL"]);
        assert_eq!(store.count().await, 1);
    }

    // ==================== 失败路径 ====================

    /// 测试上游超过 200ms 时返回 500 且不写库
    #[actix_web::test]
    async fn test_slow_upstream_returns_opaque_error_without_write() {
        let url = spawn_http(200, UPSTREAM_BODY, Duration::from_millis(500)).await;
        let provider = Arc::new(AwesomeApiProvider::new(reqwest::Client::new(), url, Duration::from_millis(200)));
        let store = store().await;

        let (status, body) = call(provider, store.clone()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, SERVER_ERROR_MESSAGE.as_bytes());
        assert_eq!(store.count().await, 0);
    }

    /// 测试写库超时返回 500 且库中没有这条报价
    #[actix_web::test]
    async fn test_persist_timeout_returns_error_and_stores_nothing() {
        let path = temp_path("handler-persist-timeout.db");
        let store = Arc::new(
            SqliteStore::open(&path.to_string_lossy(), Duration::from_millis(10))
                .await
                .unwrap(),
        );

        // 另一连接占住写锁，使 INSERT 超过 10ms
        let mut locker = SqliteConnection::connect_with(&SqliteConnectOptions::new().filename(&path))
            .await
            .unwrap();
        sqlx::query("BEGIN EXCLUSIVE").execute(&mut locker).await.unwrap();

        let (status, body) = call(FakeProvider::ok(sample_quotation()), store.clone()).await;

        sqlx::query("COMMIT").execute(&mut locker).await.unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, SERVER_ERROR_MESSAGE.as_bytes());
        assert_eq!(store.count().await, 0);

        locker.close().await.unwrap();
        store.close().await;
        let _ = std::fs::remove_file(&path);
    }

    /// 测试各类内部失败返回同一条提示
    #[actix_web::test]
    async fn test_error_message_is_the_same_for_every_failure() {
        let decode = serde_json::from_str::<Value>("{").unwrap_err();
        let failures = vec![
            QuoteError::Decode(decode),
            QuoteError::UpstreamStatus { status: 502, body: "upstream secret".to_string() },
        ];

        for failure in failures {
            let (status, body) = call(FakeProvider::failing(failure), store().await).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, SERVER_ERROR_MESSAGE.as_bytes());
        }

        let closed = store().await;
        closed.close().await;
        let (status, body) = call(FakeProvider::ok(sample_quotation()), closed).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, SERVER_ERROR_MESSAGE.as_bytes());
    }
}
