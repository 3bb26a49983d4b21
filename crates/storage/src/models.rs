use chrono::{DateTime, Utc};
use domain::{Author, AuthorSummary, Comment, Post, PostId, PostStatus, PostWithAuthor};
use serde::{Deserialize, Deserializer};

// 空白字符串在边界处统一视为"缺失"，领域层只需处理 None
fn non_blank<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<String> = Option::deserialize(d)?;
    Ok(v.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
pub struct RestPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub cover_image_url: Option<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub author_id: Option<i64>,

    // 内嵌关联 (来自 authors 表)
    #[serde(default)]
    pub authors: Option<RestAuthorSummary>,
}

#[derive(Deserialize)]
pub struct RestAuthorSummary {
    #[serde(default, deserialize_with = "non_blank")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub avatar_url: Option<String>,
}

impl From<RestAuthorSummary> for AuthorSummary {
    fn from(r: RestAuthorSummary) -> Self {
        AuthorSummary {
            name: r.name,
            bio: r.bio,
            avatar_url: r.avatar_url,
        }
    }
}

impl RestPost {
    fn split(self) -> (Post, Option<RestAuthorSummary>) {
        let post = Post {
            id: PostId::new_unchecked(self.id),
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            cover_image_url: self.cover_image_url,
            status: self.status,
            created_at: self.created_at,
            author_id: self.author_id,
        };
        (post, self.authors)
    }
}

impl From<RestPost> for Post {
    fn from(r: RestPost) -> Self {
        r.split().0
    }
}

impl From<RestPost> for PostWithAuthor {
    fn from(r: RestPost) -> Self {
        let (post, author) = r.split();
        PostWithAuthor {
            post,
            author: author.map(Into::into),
        }
    }
}

#[derive(Deserialize)]
pub struct RestAuthor {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub email: Option<String>,
}

impl From<RestAuthor> for Author {
    fn from(r: RestAuthor) -> Self {
        Author {
            id: r.id,
            name: r.name,
            bio: r.bio,
            avatar_url: r.avatar_url,
            email: r.email,
        }
    }
}

#[derive(Deserialize)]
pub struct RestComment {
    pub id: i64,
    pub post_id: i64,
    pub user_name: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub email: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<RestComment> for Comment {
    fn from(r: RestComment) -> Self {
        Comment {
            id: r.id,
            post_id: PostId::new_unchecked(r.post_id),
            user_name: r.user_name,
            email: r.email,
            content: r.content,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_row_with_embedded_author() {
        let row: RestPost = serde_json::from_value(json!({
            "id": 1,
            "title": "Hello",
            "content": "Body",
            "cover_image_url": "",
            "status": "published",
            "created_at": "2024-05-01T10:00:00.123456+00:00",
            "author_id": 7,
            "authors": {"name": "Ada", "bio": "  ", "avatar_url": null}
        }))
        .unwrap();
        let p: PostWithAuthor = row.into();
        assert_eq!(p.post.id.get(), 1);
        assert_eq!(p.post.excerpt, None);
        assert_eq!(p.post.cover_image_url, None);
        let author = p.author.unwrap();
        assert_eq!(author.name.as_deref(), Some("Ada"));
        assert_eq!(author.bio, None);
    }

    #[test]
    fn post_row_without_relation() {
        let row: RestPost = serde_json::from_value(json!({
            "id": 2,
            "title": "Orphan",
            "content": "Body",
            "status": "published",
            "created_at": "2024-05-01T10:00:00Z",
            "author_id": null,
            "authors": null
        }))
        .unwrap();
        let p: PostWithAuthor = row.into();
        assert!(p.author.is_none());
        assert_eq!(p.post.author_id, None);
    }
}
