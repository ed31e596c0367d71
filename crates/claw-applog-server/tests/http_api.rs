//! End-to-end tests against a running server over TCP.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use claw_applog_server::{LogServer, ServerConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Find an available port for testing.
async fn find_available_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// A server that shuts down when dropped.
struct TestServer {
    base: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    async fn start(root: &Path) -> Self {
        let port = find_available_port().await;
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let server = LogServer::new(ServerConfig::new(addr).with_store_root(root));

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = server.serve_with_shutdown(addr, shutdown).await {
                eprintln!("Server error: {e}");
            }
        });

        let base = format!("http://{addr}");
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(format!("{base}/health")).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Self {
            base,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), handle).await;
        }
    }
}

async fn upload(client: &reqwest::Client, server: &TestServer, body: &Value) -> reqwest::Response {
    client
        .post(server.url("/upload"))
        .json(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn upload_and_query_over_http() {
    let dir = TempDir::new().unwrap();
    let server = TestServer::start(dir.path()).await;
    let client = reqwest::Client::new();

    let response = upload(
        &client,
        &server,
        &json!({
            "application_id": "svc1",
            "log_level": "INFO",
            "timestamp": "2024-01-01T00:00:00Z",
            "log_message": "started"
        }),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Log uploaded successfully");

    let partitions: Vec<_> = std::fs::read_dir(dir.path().join("svc1"))
        .unwrap()
        .filter_map(Result::ok)
        .collect();
    assert_eq!(partitions.len(), 1);
    let content = std::fs::read_to_string(partitions[0].path()).unwrap();
    assert_eq!(content, "[2024-01-01T00:00:00Z] [INFO]: started\n");

    let response = client
        .get(server.url("/query?application_id=svc1&log_level=INFO"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["application_id"], "svc1");
    assert_eq!(body["log_level"], "INFO");
    assert_eq!(body["logs"][0]["log_level"], "INFO");
    assert_eq!(body["logs"][0]["timestamp"], "2024-01-01T00:00:00Z");
    assert_eq!(body["logs"][0]["log_message"], "started");

    server.stop().await;
}

#[tokio::test]
async fn limit_and_loose_filter_over_http() {
    let dir = TempDir::new().unwrap();
    let server = TestServer::start(dir.path()).await;
    let client = reqwest::Client::new();

    for i in 0..5 {
        let response = upload(
            &client,
            &server,
            &json!({
                "application_id": "worker",
                "log_level": "ERROR",
                "timestamp": format!("t{i}"),
                "log_message": format!("failure {i}")
            }),
        )
        .await;
        assert_eq!(response.status(), 200);
    }

    let body: Value = client
        .get(server.url("/query?application_id=worker&log_level=ERR&limit=3"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0]["log_message"], "failure 0");
    assert_eq!(logs[2]["log_message"], "failure 2");

    let body: Value = client
        .get(server.url("/query?application_id=worker&log_level=ERR&match=exact"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["logs"].as_array().unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn error_statuses_over_http() {
    let dir = TempDir::new().unwrap();
    let server = TestServer::start(dir.path()).await;
    let client = reqwest::Client::new();

    let response = upload(&client, &server, &json!({ "application_id": "svc1" })).await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let response = client
        .get(server.url("/query?application_id=svc1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = client
        .get(server.url("/query?application_id=never-logged&log_level=INFO"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(!body.to_string().contains(&dir.path().display().to_string()));

    server.stop().await;
}
