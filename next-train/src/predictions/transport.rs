//! HTTP transport for the prediction API.
//!
//! The fetcher decides what to request and how to react to failures; a
//! [`Transport`] only performs one GET and reports what came back.

use std::future::Future;
use std::time::Duration;

use super::error::PredictionError;

/// Certificate validation mode for a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Normal certificate validation.
    Verified,
    /// Certificate validation disabled. Only used for the fallback attempt.
    Unverified,
}

/// A fully built GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl PredictionRequest {
    /// Value of the named header, if set.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a response that was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A request that produced no response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection or TLS handshake failed
    #[error("connection failed: {0}")]
    Connect(String),

    /// The transport's own timeout elapsed
    #[error("request timed out")]
    Timeout,

    /// Any other failure while sending or reading
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Performs a single GET.
pub trait Transport: Send + Sync + 'static {
    fn get(
        &self,
        request: &PredictionRequest,
        tls: TlsMode,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// reqwest-backed transport with one client per [`TlsMode`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    verified: reqwest::Client,
    unverified: reqwest::Client,
}

impl HttpTransport {
    /// Build both clients. `timeout` of `None` keeps reqwest's default.
    pub fn new(timeout: Option<Duration>) -> Result<Self, PredictionError> {
        let mut verified = reqwest::Client::builder();
        let mut unverified = reqwest::Client::builder().danger_accept_invalid_certs(true);

        if let Some(timeout) = timeout {
            verified = verified.timeout(timeout);
            unverified = unverified.timeout(timeout);
        }

        Ok(Self {
            verified: verified.build()?,
            unverified: unverified.build()?,
        })
    }
}

impl Transport for HttpTransport {
    async fn get(
        &self,
        request: &PredictionRequest,
        tls: TlsMode,
    ) -> Result<RawResponse, TransportError> {
        let client = match tls {
            TlsMode::Verified => &self.verified,
            TlsMode::Unverified => &self.unverified,
        };

        let mut builder = client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        // Only a 200 body is ever parsed.
        if status != 200 {
            return Ok(RawResponse::new(status, String::new()));
        }

        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = PredictionRequest {
            url: "http://localhost/N12".into(),
            headers: vec![("Cache-Control", "no-cache".into())],
        };

        assert_eq!(request.header("cache-control"), Some("no-cache"));
        assert_eq!(request.header("api_key"), None);
    }

    #[test]
    fn transport_error_display() {
        assert_eq!(TransportError::Timeout.to_string(), "request timed out");
        assert_eq!(
            TransportError::Connect("tls handshake".into()).to_string(),
            "connection failed: tls handshake"
        );
    }

    #[test]
    fn http_transport_creation() {
        assert!(HttpTransport::new(None).is_ok());
        assert!(HttpTransport::new(Some(Duration::from_secs(5))).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let transport = HttpTransport::new(Some(Duration::from_secs(2))).unwrap();
        let request = PredictionRequest {
            url: "http://127.0.0.1:1/N12".into(),
            headers: vec![],
        };

        let result = transport.get(&request, TlsMode::Verified).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn error_status_does_not_wait_for_the_body() {
        use std::io::{Read, Write};

        // Announces a large body and then never sends it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(
                b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 1000000\r\n\r\n",
            );
            std::thread::sleep(Duration::from_secs(5));
        });

        let transport = HttpTransport::new(None).unwrap();
        let request = PredictionRequest {
            url: format!("http://{addr}/N12"),
            headers: vec![],
        };

        let response = tokio::time::timeout(
            Duration::from_secs(2),
            transport.get(&request, TlsMode::Verified),
        )
        .await
        .expect("error status should return without reading the body")
        .unwrap();

        assert_eq!(response, RawResponse::new(500, ""));
    }
}
