use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use url::Url;

mod error;
mod models;
mod query;
mod repo;

pub use error::StorageError;
pub use query::{Order, Query};

/// 远程 PostgREST 服务的连接参数
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub url: String,
    pub anon_key: String,
    /// 非 public schema 时通过 Accept-Profile / Content-Profile 指定
    pub schema: Option<String>,
}

#[derive(Clone)]
pub struct Db {
    pub(crate) client: reqwest::Client,
    pub(crate) rest_base: Url,
}

impl Db {
    pub fn new(config: &ClientConfig) -> Result<Self, StorageError> {
        if config.anon_key.trim().is_empty() {
            return Err(StorageError::Config("anon key is empty".into()));
        }

        let mut base = config.url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let rest_base = Url::parse(&base)
            .and_then(|u| u.join("rest/v1/"))
            .map_err(|e| StorageError::Config(format!("invalid service url '{}': {}", config.url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("apikey"), header_value(&config.anon_key)?);
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {}", config.anon_key))?,
        );
        if let Some(schema) = config.schema.as_deref().filter(|s| !s.is_empty() && *s != "public") {
            headers.insert(HeaderName::from_static("accept-profile"), header_value(schema)?);
            headers.insert(HeaderName::from_static("content-profile"), header_value(schema)?);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("quill/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        tracing::debug!("PostgREST client ready at {}", rest_base);
        Ok(Self { client, rest_base })
    }

    pub(crate) fn endpoint(&self, table: &str) -> Result<Url, StorageError> {
        self.rest_base
            .join(table)
            .map_err(|e| StorageError::Config(format!("invalid table name '{}': {}", table, e)))
    }
}

fn header_value(raw: &str) -> Result<HeaderValue, StorageError> {
    HeaderValue::from_str(raw).map_err(|e| StorageError::Config(format!("invalid header value: {}", e)))
}
