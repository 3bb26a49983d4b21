//! 测试用的内存数据源

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use domain::{
    Author, AuthorSummary, Comment, NewComment, Post, PostId, PostStatus, PostWithAuthor,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use storage::StorageError;

use crate::BlogSource;

pub fn post(id: i64) -> PostWithAuthor {
    PostWithAuthor {
        post: Post {
            id: PostId::new_unchecked(id),
            title: format!("Post {}", id),
            content: "x".repeat(200),
            excerpt: None,
            cover_image_url: None,
            status: PostStatus::Published,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + ChronoDuration::days(id),
            author_id: Some(1),
        },
        author: Some(AuthorSummary {
            name: Some("Ada".into()),
            bio: None,
            avatar_url: None,
        }),
    }
}

pub fn comment(id: i64, post_id: i64, minute: i64) -> Comment {
    Comment {
        id,
        post_id: PostId::new_unchecked(post_id),
        user_name: format!("user{}", id),
        email: None,
        content: format!("comment {}", id),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
            + ChronoDuration::minutes(minute),
    }
}

pub fn service_error(message: &str) -> StorageError {
    StorageError::Service {
        status: 500,
        code: None,
        message: message.into(),
        details: None,
        hint: None,
    }
}

/// 可配置延迟与失败的数据源，并统计各方法调用次数
#[derive(Default)]
pub struct FakeSource {
    pub posts: HashMap<i64, PostWithAuthor>,
    pub comments: Mutex<HashMap<i64, Vec<Comment>>>,
    pub author: Option<Author>,
    pub post_delay: HashMap<i64, Duration>,
    pub fail_posts: bool,
    pub fail_comments: bool,
    pub fail_insert: bool,
    pub fail_author: bool,
    pub insert_delay: Duration,
    pub post_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl FakeSource {
    pub fn with_posts(ids: &[i64]) -> Self {
        let mut src = Self::default();
        for id in ids {
            src.posts.insert(*id, post(*id));
        }
        src.next_id.store(1000, Ordering::SeqCst);
        src
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.post_calls.load(Ordering::SeqCst),
            self.insert_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl BlogSource for FakeSource {
    async fn published_posts(&self) -> Result<Vec<PostWithAuthor>, StorageError> {
        if self.fail_posts {
            return Err(service_error("posts unavailable"));
        }
        let mut all: Vec<_> = self.posts.values().cloned().collect();
        all.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(all)
    }

    async fn post_with_author(&self, id: PostId) -> Result<PostWithAuthor, StorageError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.post_delay.get(&id.get()) {
            tokio::time::sleep(*d).await;
        }
        if self.fail_posts {
            return Err(service_error("posts unavailable"));
        }
        self.posts.get(&id.get()).cloned().ok_or(StorageError::NotFound)
    }

    async fn comments_for(&self, id: PostId) -> Result<Vec<Comment>, StorageError> {
        if self.fail_comments {
            return Err(service_error("comments unavailable"));
        }
        let map = self.comments.lock().unwrap();
        Ok(map.get(&id.get()).cloned().unwrap_or_default())
    }

    async fn insert_comment(&self, c: &NewComment) -> Result<Vec<Comment>, StorageError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if !self.insert_delay.is_zero() {
            tokio::time::sleep(self.insert_delay).await;
        }
        if self.fail_insert {
            return Err(service_error("insert rejected"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let row = Comment {
            id,
            post_id: c.post_id,
            user_name: c.user_name.clone(),
            email: c.email.clone(),
            content: c.content.clone(),
            created_at: Utc::now(),
        };
        self.comments
            .lock()
            .unwrap()
            .entry(c.post_id.get())
            .or_default()
            .push(row.clone());
        Ok(vec![row])
    }

    async fn primary_author(&self) -> Result<Option<Author>, StorageError> {
        if self.fail_author {
            return Err(service_error("authors unavailable"));
        }
        Ok(self.author.clone())
    }

    async fn posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, StorageError> {
        if self.fail_posts {
            return Err(service_error("posts unavailable"));
        }
        let mut all: Vec<Post> = self
            .posts
            .values()
            .filter(|p| p.post.author_id == Some(author_id))
            .map(|p| p.post.clone())
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}
