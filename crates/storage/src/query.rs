use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;

use crate::{Db, StorageError};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// 单表查询构造器：过滤 / 排序 / 选列（可内嵌关联表）/ 单行 / 插入
#[must_use]
pub struct Query<'a> {
    db: &'a Db,
    table: &'static str,
    params: Vec<(String, String)>,
}

impl Db {
    pub fn table(&self, table: &'static str) -> Query<'_> {
        Query {
            db: self,
            table,
            params: Vec::new(),
        }
    }
}

impl<'a> Query<'a> {
    /// 例如 `"*, authors (name, bio)"`，空白会被去掉
    pub fn select(mut self, columns: &str) -> Self {
        let cols: String = columns.chars().filter(|c| !c.is_whitespace()).collect();
        self.params.push(("select".into(), cols));
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.into(), format!("eq.{}", value)));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.params
            .push(("order".into(), format!("{}.{}", column, order.as_str())));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".into(), n.to_string()));
        self
    }

    #[cfg(test)]
    pub(crate) fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub async fn fetch_all<T: DeserializeOwned>(self) -> Result<Vec<T>, StorageError> {
        let req = self.db.client.get(self.db.endpoint(self.table)?).query(&self.params);
        let body = send(self.table, req).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// 恰好一行；0 行时返回 `StorageError::NotFound`
    pub async fn fetch_single<T: DeserializeOwned>(self) -> Result<T, StorageError> {
        let req = self
            .db
            .client
            .get(self.db.endpoint(self.table)?)
            .query(&self.params)
            .header(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT));
        let body = send(self.table, req).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// 批量插入并返回服务端回显的行（含服务端生成的 id / 时间戳）
    pub async fn insert<B, T>(self, rows: &[B]) -> Result<Vec<T>, StorageError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let req = self
            .db
            .client
            .post(self.db.endpoint(self.table)?)
            .query(&self.params)
            .header("prefer", HeaderValue::from_static(RETURN_REPRESENTATION))
            .json(rows);
        let body = send(self.table, req).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn send(table: &str, req: RequestBuilder) -> Result<Vec<u8>, StorageError> {
    let resp: Response = req.send().await?;
    let status = resp.status();
    let body = resp.bytes().await?.to_vec();
    tracing::debug!(table, status = status.as_u16(), len = body.len(), "PostgREST response");

    if !status.is_success() {
        return Err(StorageError::from_response(status.as_u16(), &body));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{db_for, ANON_KEY};
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn builder_encodes_postgrest_params() {
        let db = Db::new(&crate::ClientConfig {
            url: "https://demo.supabase.co".into(),
            anon_key: ANON_KEY.into(),
            schema: None,
        })
        .unwrap();
        let q = db
            .table("posts")
            .select("*,\n  authors (name)")
            .eq("status", "published")
            .order("created_at", Order::Desc)
            .limit(1);
        let expected: Vec<(String, String)> = vec![
            ("select".into(), "*,authors(name)".into()),
            ("status".into(), "eq.published".into()),
            ("order".into(), "created_at.desc".into()),
            ("limit".into(), "1".into()),
        ];
        assert_eq!(q.params(), expected.as_slice());
    }

    #[tokio::test]
    async fn fetch_all_sends_auth_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/tags")
                    .query_param("select", "*")
                    .header("apikey", ANON_KEY)
                    .header("authorization", format!("Bearer {}", ANON_KEY));
                then.status(200).json_body(json!([{"name": "rust"}, {"name": "web"}]));
            })
            .await;

        let db = db_for(&server);
        let rows: Vec<serde_json::Value> = db.table("tags").select("*").fetch_all().await.unwrap();
        mock.assert_async().await;
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn fetch_single_maps_zero_rows_to_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/posts").query_param("id", "eq.404");
                then.status(406).json_body(json!({
                    "code": "PGRST116",
                    "details": "The result contains 0 rows",
                    "hint": null,
                    "message": "JSON object requested, multiple (or no) rows returned"
                }));
            })
            .await;

        let db = db_for(&server);
        let err = db
            .table("posts")
            .eq("id", 404)
            .fetch_single::<serde_json::Value>()
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn server_errors_are_structured() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/posts");
                then.status(401).json_body(json!({
                    "code": "PGRST301",
                    "details": null,
                    "hint": null,
                    "message": "JWT expired"
                }));
            })
            .await;

        let db = db_for(&server);
        let err = db.table("posts").fetch_all::<serde_json::Value>().await.unwrap_err();
        match err {
            StorageError::Service { status, message, .. } => {
                assert_eq!(status, 401);
                assert_eq!(message, "JWT expired");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
