//! Minimal HTTP/1.1 server answering canned JSON for client tests.

use std::sync::{Arc, Mutex};

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::KartverketClient;
use crate::config::ApiConfig;

/// Canned answer for one request path
#[derive(Debug, Clone, Copy)]
pub(crate) struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: &'static str,
}

impl Route {
    pub fn ok(path: &'static str, body: &'static str) -> Self {
        Self {
            path,
            status: 200,
            body,
        }
    }

    pub fn failing(path: &'static str) -> Self {
        Self {
            path,
            status: 503,
            body: "{}",
        }
    }
}

pub(crate) struct TestServer {
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Bind to an ephemeral port and serve `routes`; unknown paths get 404.
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = requests.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let routes = routes.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let request = String::from_utf8_lossy(&buf);
                    let target = request.split_whitespace().nth(1).unwrap_or("/");
                    let path = target.split('?').next().unwrap_or(target).to_string();
                    log.lock().unwrap().push(path.clone());

                    let (status, body) = routes
                        .iter()
                        .find(|route| route.path == path)
                        .map_or((404, "{}"), |route| (route.status, route.body));
                    let response = format!(
                        "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { base, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Paths requested so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Config whose kommuneinfo primary and fallback live on this server
    pub fn admin_api(&self) -> ApiConfig {
        ApiConfig {
            admin_base: self.url("/primary"),
            admin_fallback_base: self.url("/fallback"),
            ..ApiConfig::default()
        }
    }
}

/// Client that ignores proxy settings from the environment
pub(crate) fn local_client(api: &ApiConfig) -> KartverketClient {
    let client = Client::builder().no_proxy().build().unwrap();
    KartverketClient::with_client(client, api).unwrap()
}
