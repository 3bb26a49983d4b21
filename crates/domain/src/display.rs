//! 页面展示用的兜底值与文本处理

use chrono::{DateTime, Utc};

use crate::models::{Author, AuthorSummary, Post, PostWithAuthor};

pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const NO_BIO: &str = "No bio yet";
pub const NO_PROFILE_BIO: &str = "No detailed bio yet";
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/150";
pub const EXCERPT_CHARS: usize = 150;
pub const ELLIPSIS: &str = "...";

/// 列表卡片摘要：优先使用 `excerpt` 字段，否则截取正文
pub fn excerpt(post: &Post) -> String {
    match &post.excerpt {
        Some(e) => e.clone(),
        None => truncate_chars(&post.content, EXCERPT_CHARS),
    }
}

/// 按字符（非字节）截断，超长时追加省略号
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// 正文按换行拆成段落（保留空段，与原排版一致）
pub fn paragraphs(content: &str) -> Vec<&str> {
    content.split('\n').map(|p| p.trim_end_matches('\r')).collect()
}

pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

pub fn format_datetime(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

impl AuthorSummary {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn display_bio(&self) -> &str {
        self.bio.as_deref().unwrap_or(NO_BIO)
    }

    pub fn display_avatar(&self) -> &str {
        self.avatar_url.as_deref().unwrap_or(PLACEHOLDER_AVATAR)
    }
}

impl PostWithAuthor {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(AuthorSummary::display_name)
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn author_bio(&self) -> &str {
        self.author
            .as_ref()
            .map(AuthorSummary::display_bio)
            .unwrap_or(NO_BIO)
    }

    pub fn author_avatar(&self) -> &str {
        self.author
            .as_ref()
            .map(AuthorSummary::display_avatar)
            .unwrap_or(PLACEHOLDER_AVATAR)
    }
}

impl Author {
    pub fn display_bio(&self) -> &str {
        self.bio.as_deref().unwrap_or(NO_PROFILE_BIO)
    }

    pub fn display_avatar(&self) -> &str {
        self.avatar_url.as_deref().unwrap_or(PLACEHOLDER_AVATAR)
    }
}
