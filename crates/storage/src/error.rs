use serde::Deserialize;
use thiserror::Error;

/// 远程服务调用的结构化错误，每次调用后由调用方显式检查
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid client configuration: {0}")]
    Config(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("row not found")]
    NotFound,
    #[error("{message}")]
    Service {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// PostgREST 单行查询命中 0 行（或多行）时返回的错误码
const SINGLE_ROW_MISMATCH: &str = "PGRST116";

#[derive(Deserialize)]
struct ServiceBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl StorageError {
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ServiceBody>(body) {
            Ok(b) => {
                if b.code.as_deref() == Some(SINGLE_ROW_MISMATCH) {
                    return StorageError::NotFound;
                }
                StorageError::Service {
                    status,
                    code: b.code,
                    message: b.message.unwrap_or_else(|| format!("service returned status {}", status)),
                    details: b.details,
                    hint: b.hint,
                }
            }
            Err(_) => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                StorageError::Service {
                    status,
                    code: None,
                    message: if text.is_empty() {
                        format!("service returned status {}", status)
                    } else {
                        text
                    },
                    details: None,
                    hint: None,
                }
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound)
    }
}
