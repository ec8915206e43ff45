//! Product record stores
//!
//! The catalog lives in a headless database exposing a REST records API
//! (`POST /api/v2/tables/{table}/records`, authenticated with an
//! `xc-token` header). [`HttpStore`] talks to that API; [`DirectoryStore`]
//! writes the same payloads as JSON files for offline runs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::entities::product::CreateProduct;
use crate::mapping::amazon::generate_slug;

/// HTTP request timeout for a single record creation
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API token
const TOKEN_HEADER: &str = "xc-token";

/// Errors from creating a record
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never got a response (network, DNS, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("Erro {status}: {message}")]
    Status { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for created products
pub trait ProductStore {
    /// Create one product record
    fn create(&self, product: &CreateProduct) -> Result<(), StoreError>;
}

/// Records API client
pub struct HttpStore {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl HttpStore {
    /// Create a client for `{base_url}/api/v2/tables/{table}/records`
    pub fn new(base_url: &str, table: &str, token: &str) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url, table, token))
    }

    /// Use a preconfigured client
    pub fn with_client(
        client: reqwest::blocking::Client,
        base_url: &str,
        table: &str,
        token: &str,
    ) -> Self {
        Self {
            client,
            endpoint: records_endpoint(base_url, table),
            token: token.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ProductStore for HttpStore {
    fn create(&self, product: &CreateProduct) -> Result<(), StoreError> {
        debug!(endpoint = %self.endpoint, name = %product.name, "creating record");

        let response = self
            .client
            .post(&self.endpoint)
            .header(TOKEN_HEADER, &self.token)
            .json(product)
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "record creation rejected");
        Err(StoreError::Status {
            status: status.as_u16(),
            message: api_error_message(&body),
        })
    }
}

/// Build the records endpoint URL
pub fn records_endpoint(base_url: &str, table: &str) -> String {
    format!(
        "{}/api/v2/tables/{}/records",
        base_url.trim_end_matches('/'),
        table
    )
}

/// Extract a readable message from an API error body
///
/// Uses the JSON `message` or `msg` field when present, else the raw body.
pub fn api_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    if body.trim().is_empty() {
        "Falha ao criar produto".to_string()
    } else {
        body.to_string()
    }
}

/// Writes each product as `{slug}.json` into a directory
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Use `dir` as output, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First free file path for a product name
    fn file_path_for(&self, name: &str) -> PathBuf {
        let slug = match generate_slug(name) {
            s if s.is_empty() => "product".to_string(),
            s => s,
        };

        let mut path = self.dir.join(format!("{}.json", slug));
        let mut n = 2;
        while path.exists() {
            path = self.dir.join(format!("{}-{}.json", slug, n));
            n += 1;
        }
        path
    }
}

impl ProductStore for DirectoryStore {
    fn create(&self, product: &CreateProduct) -> Result<(), StoreError> {
        let path = self.file_path_for(&product.name);
        let json = serde_json::to_string_pretty(product)?;
        fs::write(&path, json)?;
        debug!(path = %path.display(), "wrote product file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use tempfile::tempdir;

    #[test]
    fn test_records_endpoint() {
        assert_eq!(
            records_endpoint("https://db.example.com/", "m6bx9e"),
            "https://db.example.com/api/v2/tables/m6bx9e/records"
        );
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(api_error_message(r#"{"message":"bad field"}"#), "bad field");
        assert_eq!(api_error_message(r#"{"msg":"no token"}"#), "no token");
        assert_eq!(api_error_message("gateway down"), "gateway down");
        assert_eq!(api_error_message(""), "Falha ao criar produto");
    }

    #[test]
    fn test_status_error_display() {
        let err = StoreError::Status {
            status: 401,
            message: "no token".to_string(),
        };
        assert_eq!(err.to_string(), "Erro 401: no token");
    }

    #[test]
    fn test_http_store_builds() {
        let store = HttpStore::new("http://localhost:8080", "products", "t").unwrap();
        assert_eq!(
            store.endpoint(),
            "http://localhost:8080/api/v2/tables/products/records"
        );
    }

    /// Answer one request on a local port; the handle yields the raw request
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            let header_end = loop {
                let n = stream.read(&mut buf).unwrap();
                assert!(n > 0, "connection closed before headers");
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
            let content_length: usize = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .map(|v| v.trim().parse().unwrap())
                .unwrap_or(0);
            while request.len() < header_end + content_length {
                let n = stream.read(&mut buf).unwrap();
                assert!(n > 0, "connection closed before body");
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8(request).unwrap()
        });

        (base_url, handle)
    }

    /// Store talking straight to the local server, ignoring proxy env vars
    fn local_store(base_url: &str, table: &str, token: &str) -> HttpStore {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpStore::with_client(client, base_url, table, token)
    }

    #[test]
    fn test_http_store_rejected_record() {
        let (base_url, server) = serve_once("422 Unprocessable Entity", r#"{"msg":"x"}"#);
        let store = local_store(&base_url, "m6bx9e", "secret");

        let result = store.create(&CreateProduct::new("Batom", "desc"));
        match result {
            Err(StoreError::Status { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "x");
            }
            other => panic!("expected status error, got {:?}", other),
        }

        let request = server.join().unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /api/v2/tables/m6bx9e/records "));
        assert!(lower.contains("xc-token: secret\r\n"));
        assert!(lower.contains("content-type: application/json"));

        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["name"], "Batom");
        assert_eq!(sent["description"], "desc");
    }

    #[test]
    fn test_http_store_created_record() {
        let (base_url, server) = serve_once("200 OK", r#"{"Id":1}"#);
        let store = local_store(&base_url, "products", "");

        assert!(store.create(&CreateProduct::new("Gloss", "")).is_ok());
        assert!(server.join().unwrap().contains("\"name\":\"Gloss\""));
    }

    #[test]
    fn test_directory_store_writes_unique_files() {
        let tmp = tempdir().unwrap();
        let store = DirectoryStore::new(tmp.path().join("out")).unwrap();

        let product = CreateProduct::new("Batom Líquido", "desc");
        store.create(&product).unwrap();
        store.create(&product).unwrap();

        assert!(store.dir().join("batom-liquido.json").exists());
        assert!(store.dir().join("batom-liquido-2.json").exists());

        let content = fs::read_to_string(store.dir().join("batom-liquido.json")).unwrap();
        let parsed: CreateProduct = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, product);
    }

    #[test]
    fn test_directory_store_fallback_name() {
        let tmp = tempdir().unwrap();
        let store = DirectoryStore::new(tmp.path()).unwrap();
        store.create(&CreateProduct::new("???", "")).unwrap();
        assert!(tmp.path().join("product.json").exists());
    }
}
