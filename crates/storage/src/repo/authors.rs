use crate::{models::RestAuthor, Db, Order, StorageError};
use domain::Author;

impl Db {
    // 单作者博客：取 id 最小的一条，表为空时返回 None
    pub async fn get_primary_author(&self) -> Result<Option<Author>, StorageError> {
        let rows: Vec<RestAuthor> = self
            .table("authors")
            .select("*")
            .order("id", Order::Asc)
            .limit(1)
            .fetch_all()
            .await?;

        Ok(rows.into_iter().next().map(Into::into))
    }
}
