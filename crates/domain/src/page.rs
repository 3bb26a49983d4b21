use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageError {
    #[error("Post not found")]
    NotFound,
    #[error("{context}: {message}")]
    Fetch {
        context: &'static str,
        message: String,
    },
}

impl PageError {
    pub fn fetch(context: &'static str, err: impl std::fmt::Display) -> Self {
        PageError::Fetch {
            context,
            message: err.to_string(),
        }
    }
}

/// 单个页面的加载状态，取代 loading/error/data 三个独立标志
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    #[serde(rename = "error")]
    Failed(PageError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn status(&self) -> PageStatus {
        match self {
            LoadState::Idle => PageStatus::Idle,
            LoadState::Loading => PageStatus::Loading,
            LoadState::Ready(_) => PageStatus::Ready,
            LoadState::Failed(_) => PageStatus::Error,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PageError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// 提交评论后给用户的提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Success(String),
    Failure(String),
    Prompt(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Failure(m) | Notice::Prompt(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }
}
