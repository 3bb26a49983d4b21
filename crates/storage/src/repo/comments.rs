use crate::{models::RestComment, Db, Order, StorageError};
use domain::{Comment, NewComment, PostId};

impl Db {
    // 旧评论在前
    pub async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, StorageError> {
        let rows: Vec<RestComment> = self
            .table("comments")
            .select("*")
            .eq("post_id", post_id)
            .order("created_at", Order::Asc)
            .fetch_all()
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 写入一条评论，返回服务端确认后的行
    pub async fn insert_comment(&self, c: &NewComment) -> Result<Vec<Comment>, StorageError> {
        let rows: Vec<RestComment> = self
            .table("comments")
            .select("*")
            .insert(std::slice::from_ref(c))
            .await?;

        tracing::debug!("Comment stored for post {} ({} row(s))", c.post_id, rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
