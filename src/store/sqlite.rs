//! SQLite 存储实现
//!
//! 服务端生命周期内持有一个连接池，写入截止时间只约束 INSERT 语句，
//! 不含获取连接，也不含 COMMIT

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::QuotationStore;
use crate::deadline::with_deadline;
use crate::error::{QuoteError, QuoteResult, Stage};
use crate::models::{Quotation, StoredQuotation};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS quotation \
    (id INTEGER PRIMARY KEY, code TEXT, codein TEXT, name TEXT, high TEXT, low TEXT, varBid TEXT, \
    pctChange TEXT, bid TEXT, ask TEXT, timestamp TEXT, create_date TEXT)";

const INSERT_SQL: &str = "INSERT INTO quotation \
    (code, codein, name, high, low, varBid, pctChange, bid, ask, timestamp, create_date) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// 建表（幂等），可重复调用
pub async fn init_schema(pool: &SqlitePool) -> QuoteResult<()> {
    sqlx::query(CREATE_TABLE_SQL)
        .execute(pool)
        .await
        .map_err(QuoteError::StoreUnavailable)?;
    Ok(())
}

pub struct SqliteStore {
    pool: SqlitePool,
    write_timeout: Duration,
}

impl SqliteStore {
    /// 打开（必要时创建）数据库文件并建表
    pub async fn open(path: &str, write_timeout: Duration) -> QuoteResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(QuoteError::StoreUnavailable)?;

        Self::with_pool(pool, write_timeout).await
    }

    /// 内存数据库，仅单连接，否则每个连接各自是一个空库
    pub async fn in_memory(write_timeout: Duration) -> QuoteResult<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(QuoteError::StoreUnavailable)?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(QuoteError::StoreUnavailable)?;

        Self::with_pool(pool, write_timeout).await
    }

    async fn with_pool(pool: SqlitePool, write_timeout: Duration) -> QuoteResult<Self> {
        init_schema(&pool).await?;
        Ok(Self { pool, write_timeout })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl QuotationStore for SqliteStore {
    async fn insert(&self, quotation: Quotation) -> QuoteResult<StoredQuotation> {
        let mut tx = self.pool.begin().await.map_err(QuoteError::StoreUnavailable)?;

        // 超时只会发生在 COMMIT 之前，tx 随后被丢弃并回滚
        let id = with_deadline(Stage::Persist, self.write_timeout, async {
            sqlx::query(INSERT_SQL)
                .bind(&quotation.code)
                .bind(&quotation.codein)
                .bind(&quotation.name)
                .bind(&quotation.high)
                .bind(&quotation.low)
                .bind(&quotation.var_bid)
                .bind(&quotation.pct_change)
                .bind(&quotation.bid)
                .bind(&quotation.ask)
                .bind(&quotation.timestamp)
                .bind(&quotation.create_date)
                .execute(&mut *tx)
                .await
                .map(|result| result.last_insert_rowid())
                .map_err(|e| QuoteError::persistence("quotation", e))
        })
        .await?;

        // COMMIT 一旦发出就不再取消，按其真实结果返回
        tx.commit()
            .await
            .map_err(|e| QuoteError::persistence("quotation", e))?;

        Ok(StoredQuotation { id, quotation })
    }
}

#[cfg(test)]
impl SqliteStore {
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 最近写入的报价，按主键倒序
    pub(crate) async fn recent(&self, limit: i64) -> Vec<StoredQuotation> {
        use sqlx::Row;

        let rows = sqlx::query(
            "SELECT id, code, codein, name, high, low, varBid, pctChange, \
             bid, ask, timestamp, create_date FROM quotation ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .unwrap();

        rows.iter()
            .map(|row| StoredQuotation {
                id: row.get("id"),
                quotation: Quotation {
                    code: row.get("code"),
                    codein: row.get("codein"),
                    name: row.get("name"),
                    high: row.get("high"),
                    low: row.get("low"),
                    var_bid: row.get("varBid"),
                    pct_change: row.get("pctChange"),
                    bid: row.get("bid"),
                    ask: row.get("ask"),
                    timestamp: row.get("timestamp"),
                    create_date: row.get("create_date"),
                },
            })
            .collect()
    }

    pub(crate) async fn count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM quotation")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
