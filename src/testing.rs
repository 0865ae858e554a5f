//! 测试辅助：临时文件路径与进程内的假 HTTP 服务

use std::path::PathBuf;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 每个测试独立的临时文件路径，文件本身不会被创建
pub fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cotacao-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
}

/// 启动一个只会返回固定响应的 HTTP 服务，返回其基地址
///
/// 每个连接先等待 `delay` 再写回响应
pub async fn spawn_http(status: u16, body: &str, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let body = body.clone();

            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut received = Vec::new();
                while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => received.extend_from_slice(&buf[..n]),
                    }
                }

                tokio::time::sleep(delay).await;

                let response = format!(
                    "HTTP/1.1 {} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// 绑定后立即释放的端口，连接会被拒绝
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
