use crate::{models::RestPost, Db, Order, StorageError};
use domain::{Post, PostId, PostStatus, PostWithAuthor};

impl Db {
    // 首页列表：只取已发布文章，关联作者姓名，最新在前
    pub async fn list_published_posts(&self) -> Result<Vec<PostWithAuthor>, StorageError> {
        let rows: Vec<RestPost> = self
            .table("posts")
            .select("*, authors (name)")
            .eq("status", PostStatus::Published.as_str())
            .order("created_at", Order::Desc)
            .fetch_all()
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    // 详情页：单篇文章 + 作者完整信息；不存在时返回 NotFound
    pub async fn get_post_with_author(&self, id: PostId) -> Result<PostWithAuthor, StorageError> {
        let row: RestPost = self
            .table("posts")
            .select("*, authors (name, bio, avatar_url)")
            .eq("id", id)
            .eq("status", PostStatus::Published.as_str())
            .fetch_single()
            .await?;

        Ok(row.into())
    }

    pub async fn list_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, StorageError> {
        let rows: Vec<RestPost> = self
            .table("posts")
            .select("*")
            .eq("author_id", author_id)
            .eq("status", PostStatus::Published.as_str())
            .order("created_at", Order::Desc)
            .fetch_all()
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
