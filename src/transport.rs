use crate::error::{Error, ErrorKind};
use crate::resource_config::ResourceConfig;
use futures::future::BoxFuture;
use std::sync::Arc;

/// GET capability injected into resources and the lucky redirect.
///
/// The request is issued when `get` is called, not when the returned future
/// is first polled. The future owns everything it needs.
pub trait Transport: Send + Sync + 'static {
    fn get(&self, target: &str) -> BoxFuture<'static, Result<Vec<u8>, Error>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(&self, target: &str) -> BoxFuture<'static, Result<Vec<u8>, Error>> {
        (**self).get(target)
    }
}

/// Plain HTTP GET through reqwest.
///
/// Mirrors browser `fetch`: a non-success status still hands its body to the
/// JSON parser unless `reject_error_status` is set. Each request runs on its
/// own task of the current tokio runtime, so `get` must be called within one.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    reject_error_status: bool,
}

impl HttpTransport {
    pub fn new(reject_error_status: bool) -> Self {
        Self {
            client: reqwest::Client::new(),
            reject_error_status,
        }
    }

    pub fn from_config(config: &ResourceConfig) -> Self {
        Self::new(config.reject_error_status)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Transport for HttpTransport {
    fn get(&self, target: &str) -> BoxFuture<'static, Result<Vec<u8>, Error>> {
        let request = self.client.get(target);
        let reject_error_status = self.reject_error_status;
        let target = target.to_string();

        let exchange = tokio::spawn(async move {
            let response = match request.send().await {
                Ok(response) => response,
                Err(error) => {
                    return Err(Error::new(
                        ErrorKind::TransportFailure,
                        format!("failed to request {}: {}", target, error),
                    ))
                }
            };

            let status = response.status();
            if reject_error_status && !status.is_success() {
                return Err(Error::new(
                    ErrorKind::TransportFailure,
                    format!("{} answered with status {}", target, status),
                ));
            }

            match response.bytes().await {
                Ok(body) => Ok(body.to_vec()),
                Err(error) => Err(Error::new(
                    ErrorKind::TransportFailure,
                    format!("failed to read body from {}: {}", target, error),
                )),
            }
        });

        Box::pin(async move {
            match exchange.await {
                Ok(outcome) => outcome,
                Err(error) => Err(Error::new(
                    ErrorKind::TransportFailure,
                    format!("request task failed: {}", error),
                )),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio::time::timeout;

    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let (received_sender, received) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buffer = [0; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let length = stream.read(&mut buffer).await.unwrap();
                if length == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..length]);
            }
            let _ = received_sender.send(());

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        });

        (format!("http://{}/taxonomy/1", address), received)
    }

    #[tokio::test]
    async fn fetches_body_over_http() {
        let (target, _) = serve_once("HTTP/1.1 200 OK", r#"{"a":1}"#).await;

        let body = timeout(Duration::from_secs(3), HttpTransport::default().get(&target))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(body, br#"{"a":1}"#.to_vec());
    }

    #[tokio::test]
    async fn error_status_body_is_passed_through_by_default() {
        let (target, _) = serve_once("HTTP/1.1 500 Internal Server Error", r#"{"detail":"Unlucky."}"#).await;

        let body = timeout(Duration::from_secs(3), HttpTransport::default().get(&target))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(body, br#"{"detail":"Unlucky."}"#.to_vec());
    }

    #[tokio::test]
    async fn error_status_is_rejected_when_configured() {
        let (target, _) = serve_once("HTTP/1.1 500 Internal Server Error", r#"{"detail":"Unlucky."}"#).await;

        let error = timeout(Duration::from_secs(3), HttpTransport::new(true).get(&target))
            .await
            .unwrap()
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::TransportFailure);
    }

    #[tokio::test]
    async fn request_is_issued_before_being_awaited() {
        let (target, received) = serve_once("HTTP/1.1 200 OK", "[]").await;

        let response = HttpTransport::default().get(&target);

        timeout(Duration::from_secs(3), received)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(response.await.unwrap(), b"[]".to_vec());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let error = timeout(
            Duration::from_secs(3),
            HttpTransport::default().get(&format!("http://{}/product/1", address)),
        )
        .await
        .unwrap()
        .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::TransportFailure);
    }

    #[tokio::test]
    async fn malformed_target_is_a_transport_failure() {
        let error = HttpTransport::default().get("not a url").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::TransportFailure);
    }
}
