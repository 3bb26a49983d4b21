use async_trait::async_trait;
use domain::{Author, Comment, NewComment, Post, PostId, PostWithAuthor};
use storage::{Db, StorageError};

/// 页面加载所需的全部远程读写，`storage::Db` 是生产实现
#[async_trait]
pub trait BlogSource: Send + Sync {
    async fn published_posts(&self) -> Result<Vec<PostWithAuthor>, StorageError>;

    async fn post_with_author(&self, id: PostId) -> Result<PostWithAuthor, StorageError>;

    async fn comments_for(&self, id: PostId) -> Result<Vec<Comment>, StorageError>;

    async fn insert_comment(&self, comment: &NewComment) -> Result<Vec<Comment>, StorageError>;

    async fn primary_author(&self) -> Result<Option<Author>, StorageError>;

    async fn posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, StorageError>;
}

#[async_trait]
impl BlogSource for Db {
    async fn published_posts(&self) -> Result<Vec<PostWithAuthor>, StorageError> {
        self.list_published_posts().await
    }

    async fn post_with_author(&self, id: PostId) -> Result<PostWithAuthor, StorageError> {
        self.get_post_with_author(id).await
    }

    async fn comments_for(&self, id: PostId) -> Result<Vec<Comment>, StorageError> {
        self.list_comments(id).await
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Vec<Comment>, StorageError> {
        Db::insert_comment(self, comment).await
    }

    async fn primary_author(&self) -> Result<Option<Author>, StorageError> {
        self.get_primary_author().await
    }

    async fn posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, StorageError> {
        self.list_posts_by_author(author_id).await
    }
}
