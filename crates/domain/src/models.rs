use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 路由中的文章 ID（`/post/:id`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    pub fn new(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Post ID is empty.".to_string());
        }
        let id: i64 = s
            .parse()
            .map_err(|_| format!("Post ID must be a number, got '{}'.", s))?;
        if id <= 0 {
            return Err("Post ID must be positive.".to_string());
        }
        Ok(Self(id))
    }

    pub fn new_unchecked(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
    #[serde(other)]
    Other,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Draft => "draft",
            PostStatus::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub author_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

/// 随文章一起查询出来的作者投影，列可能只选了一部分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&Author> for AuthorSummary {
    fn from(a: &Author) -> Self {
        AuthorSummary {
            name: Some(a.name.clone()),
            bio: a.bio.clone(),
            avatar_url: a.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<AuthorSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: PostId,
    pub user_name: String,
    pub email: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// 插入 comments 表的载荷，id 和 created_at 由服务端生成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_name: String,
    pub content: String,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_parses_route_values() {
        assert_eq!(PostId::new("42").map(PostId::get), Ok(42));
        assert_eq!(PostId::new(" 7 ").map(PostId::get), Ok(7));
        assert!(PostId::new("").is_err());
        assert!(PostId::new("abc").is_err());
        assert!(PostId::new("0").is_err());
        assert!(PostId::new("-3").is_err());
    }

    #[test]
    fn unknown_status_does_not_break_decoding() {
        let s: PostStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(s, PostStatus::Other);
        let s: PostStatus = serde_json::from_str("\"published\"").unwrap();
        assert_eq!(s, PostStatus::Published);
    }

    #[test]
    fn new_comment_serializes_as_insert_row() {
        let row = NewComment {
            post_id: PostId::new_unchecked(3),
            user_name: "Ferris".into(),
            content: "hi".into(),
            email: None,
        };
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"post_id": 3, "user_name": "Ferris", "content": "hi", "email": null})
        );
    }
}
