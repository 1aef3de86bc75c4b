use async_trait::async_trait;
use url::Url;

/// Status and body of a finished GET. The body is read whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the single outbound request behind every [`crate::RetroClient`] call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> anyhow::Result<RawResponse>;
}

/// [`Transport`] over a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> anyhow::Result<RawResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused by mock")]
    pub struct MockError;

    /// Returns a canned response (or [`MockError`]) and remembers every URL it was asked for.
    #[derive(Debug)]
    pub struct MockTransport {
        reply: Option<RawResponse>,
        requests: Mutex<Vec<Url>>,
    }

    impl MockTransport {
        pub fn json(status: u16, body: &serde_json::Value) -> Self {
            Self::raw(status, body.to_string())
        }

        pub fn raw(status: u16, body: impl Into<String>) -> Self {
            Self {
                reply: Some(RawResponse {
                    status,
                    body: body.into(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<Url> {
            self.requests.lock().unwrap().clone()
        }

        pub fn last_request(&self) -> Url {
            self.requests().pop().expect("no request was made")
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: Url) -> anyhow::Result<RawResponse> {
            self.requests.lock().unwrap().push(url);
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(MockError.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    /// Serves one canned HTTP response and hands back the request line it saw.
    async fn serve_once(response: String) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });
        (Url::parse(&format!("http://{addr}/")).unwrap(), handle)
    }

    #[tokio::test]
    async fn http_transport_reads_error_bodies() {
        let body = r#"{"error":"boom"}"#;
        let response = format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (base, server) = serve_once(response).await;

        let url = base.join("top_ten.php?mode=json").unwrap();
        let raw = HttpTransport::default().get(url).await.unwrap();
        assert_eq!(raw.status, 500);
        assert!(!raw.is_success());
        assert_eq!(raw.body, body);

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /top_ten.php?mode=json HTTP/1.1");
    }

    #[tokio::test]
    async fn http_transport_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/")).unwrap();
        let err = HttpTransport::default().get(url).await.unwrap_err();
        assert!(err.downcast_ref::<reqwest::Error>().is_some());
    }
}
