//! HTTP client for the files service
//!
//! Every request carries the site ID and access token headers. Keys map
//! directly onto URL paths below the API base.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use vipgo_common::FilesConfig;

use crate::api::FilesApi;
use crate::error::{ApiError, ClientError, FILE_NOT_FOUND};

const SITE_ID_HEADER: &str = "X-Client-Site-ID";
const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";
const ACTION_HEADER: &str = "X-Action";
const FILE_EXISTS_ACTION: &str = "file_exists";

/// `reqwest`-backed [`FilesApi`]
pub struct HttpFilesApi {
    http_client: reqwest::Client,
    api_base: String,
    site_id: String,
    access_token: String,
}

impl HttpFilesApi {
    /// Create a client for the files service at `api_base`
    pub fn new(
        api_base: impl Into<String>,
        site_id: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let api_base = api_base.into();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(api_base));
        }

        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_base: api_base.trim_end_matches('/').to_string(),
            site_id: site_id.into(),
            access_token: access_token.into(),
        })
    }

    pub fn from_config(config: &FilesConfig) -> Result<Self, ClientError> {
        config.validate()?;
        Self::new(
            &config.api_base,
            &config.site_id,
            &config.access_token,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Full URL for a canonical key
    pub fn url(&self, remote_key: &str) -> String {
        format!("{}/{}", self.api_base, remote_key.trim_start_matches('/'))
    }

    fn request(&self, method: Method, remote_key: &str) -> RequestBuilder {
        let url = self.url(remote_key);
        debug!(%method, %url, "files API request");
        self.http_client
            .request(method, url)
            .header(SITE_ID_HEADER, &self.site_id)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
    }
}

impl fmt::Debug for HttpFilesApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFilesApi")
            .field("api_base", &self.api_base)
            .field("site_id", &self.site_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl FilesApi for HttpFilesApi {
    async fn get_file(&self, remote_key: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.request(Method::GET, remote_key).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.bytes().await?.to_vec()),
            StatusCode::NOT_FOUND => Err(ApiError::new(
                FILE_NOT_FOUND,
                "The requested file does not exist",
            )),
            status => Err(ApiError::operation_failed(
                "get_file",
                remote_key,
                status.as_u16(),
            )),
        }
    }

    async fn upload_file(&self, remote_key: &str, contents: &[u8]) -> Result<(), ApiError> {
        let response = self
            .request(Method::PUT, remote_key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(contents.to_vec())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::operation_failed(
                "upload_file",
                remote_key,
                status.as_u16(),
            ))
        }
    }

    async fn delete_file(&self, remote_key: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, remote_key).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(ApiError::new(
                FILE_NOT_FOUND,
                "The requested file does not exist",
            )),
            status => Err(ApiError::operation_failed(
                "delete_file",
                remote_key,
                status.as_u16(),
            )),
        }
    }

    async fn is_file(&self, remote_key: &str) -> Result<bool, ApiError> {
        let response = self
            .request(Method::GET, remote_key)
            .header(ACTION_HEADER, FILE_EXISTS_ACTION)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(ApiError::operation_failed(
                "is_file",
                remote_key,
                status.as_u16(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Bytes,
        extract::State,
        http::{HeaderMap, Method as AxumMethod, StatusCode as AxumStatus, Uri},
        response::{IntoResponse, Response},
    };
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    const SITE_ID: &str = "200508";
    const TOKEN: &str = "hunter2";

    type Store = Arc<Mutex<HashMap<String, Vec<u8>>>>;

    /// Minimal in-memory files service
    async fn files_service(
        State(store): State<Store>,
        method: AxumMethod,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        let authorized = headers.get(SITE_ID_HEADER).and_then(|v| v.to_str().ok()) == Some(SITE_ID)
            && headers.get(ACCESS_TOKEN_HEADER).and_then(|v| v.to_str().ok()) == Some(TOKEN);
        if !authorized {
            return AxumStatus::UNAUTHORIZED.into_response();
        }

        let key = uri.path().to_string();
        if key.contains("explode") {
            return AxumStatus::INTERNAL_SERVER_ERROR.into_response();
        }

        let mut store = store.lock();
        match method {
            AxumMethod::GET => match store.get(&key) {
                Some(_) if headers.contains_key(ACTION_HEADER) => AxumStatus::OK.into_response(),
                Some(data) => (AxumStatus::OK, data.clone()).into_response(),
                None => AxumStatus::NOT_FOUND.into_response(),
            },
            AxumMethod::PUT => {
                store.insert(key, body.to_vec());
                AxumStatus::OK.into_response()
            }
            AxumMethod::DELETE => match store.remove(&key) {
                Some(_) => AxumStatus::OK.into_response(),
                None => AxumStatus::NOT_FOUND.into_response(),
            },
            _ => AxumStatus::METHOD_NOT_ALLOWED.into_response(),
        }
    }

    async fn spawn_files_service() -> (String, Store) {
        let store: Store = Arc::default();
        store.lock().insert(
            "/wp-content/uploads/hello.txt".to_string(),
            b"Hello World!".to_vec(),
        );

        let app = Router::new()
            .fallback(files_service)
            .with_state(store.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), store)
    }

    fn client(api_base: &str, token: &str) -> HttpFilesApi {
        HttpFilesApi::new(api_base, SITE_ID, token, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpFilesApi::new("files.vipv2.net", SITE_ID, TOKEN, Duration::from_secs(1));
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_url_joins_key() {
        let api = client("https://files.vipv2.net/", TOKEN);
        assert_eq!(
            api.url("/wp-content/uploads/a.txt"),
            "https://files.vipv2.net/wp-content/uploads/a.txt"
        );
        assert_eq!(
            api.url("wp-content/uploads/a.txt"),
            "https://files.vipv2.net/wp-content/uploads/a.txt"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let api = client("https://files.vipv2.net", TOKEN);
        assert!(!format!("{api:?}").contains(TOKEN));
    }

    #[test]
    fn test_from_config() {
        let config = FilesConfig {
            site_id: SITE_ID.to_string(),
            access_token: TOKEN.to_string(),
            ..FilesConfig::default()
        };
        let api = HttpFilesApi::from_config(&config).unwrap();
        assert_eq!(api.url("/a"), "https://files.vipv2.net/a");
    }

    #[test]
    fn test_from_config_rejects_zero_timeout() {
        let config = FilesConfig {
            timeout_secs: 0,
            ..FilesConfig::default()
        };
        let result = HttpFilesApi::from_config(&config);
        assert!(matches!(result, Err(ClientError::Config(e)) if e.is_config_error()));
    }

    #[tokio::test]
    async fn test_get_file() {
        let (base, _) = spawn_files_service().await;
        let api = client(&base, TOKEN);

        let contents = api.get_file("/wp-content/uploads/hello.txt").await.unwrap();
        assert_eq!(contents, b"Hello World!");
    }

    #[tokio::test]
    async fn test_get_binary_file_unchanged() {
        let (base, store) = spawn_files_service().await;
        let jpeg_header = vec![0xff, 0xd8, 0xff, 0xe0, b'J', b'F', b'I', b'F'];
        store
            .lock()
            .insert("/wp-content/uploads/a.jpg".to_string(), jpeg_header.clone());
        let api = client(&base, TOKEN);

        let contents = api.get_file("/wp-content/uploads/a.jpg").await.unwrap();
        assert_eq!(contents, jpeg_header);
    }

    #[tokio::test]
    async fn test_get_missing_file() {
        let (base, _) = spawn_files_service().await;
        let api = client(&base, TOKEN);

        let error = api.get_file("/wp-content/uploads/missing.txt").await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_get_file_server_error() {
        let (base, _) = spawn_files_service().await;
        let api = client(&base, TOKEN);

        let error = api.get_file("/wp-content/uploads/explode.txt").await.unwrap_err();
        assert_eq!(error.code, "get_file-failed");
        assert!(error.message.contains("500"));
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let (base, _) = spawn_files_service().await;
        let api = client(&base, "wrong");

        let error = api.get_file("/wp-content/uploads/hello.txt").await.unwrap_err();
        assert_eq!(error.code, "get_file-failed");
        assert!(error.message.contains("401"));
    }

    #[tokio::test]
    async fn test_upload_then_delete() {
        let (base, store) = spawn_files_service().await;
        let api = client(&base, TOKEN);
        let key = "/wp-content/uploads/new.txt";

        assert!(!api.is_file(key).await.unwrap());

        api.upload_file(key, b"fresh").await.unwrap();
        assert_eq!(store.lock().get(key).map(Vec::as_slice), Some(&b"fresh"[..]));
        assert!(api.is_file(key).await.unwrap());

        api.delete_file(key).await.unwrap();
        assert!(!api.is_file(key).await.unwrap());
        assert!(api.delete_file(key).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = client(&format!("http://{addr}"), TOKEN);
        let error = api.get_file("/wp-content/uploads/hello.txt").await.unwrap_err();
        assert_eq!(error.code, crate::error::HTTP_REQUEST_FAILED);
    }
}
