use domain::{Author, LoadState, PageError, Post};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::traits::BlogSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorProfile {
    /// 作者表为空时为 None，页面显示"暂无作者信息"
    pub author: Option<Author>,
    pub posts: Vec<Post>,
}

pub type AuthorState = LoadState<AuthorProfile>;

/// 先取作者，再用其 ID 取已发布文章
pub async fn load_author_page<S: BlogSource + ?Sized>(source: &S) -> AuthorState {
    let author = match source.primary_author().await {
        Ok(Some(a)) => a,
        Ok(None) => {
            info!("No author row found");
            return LoadState::Ready(AuthorProfile {
                author: None,
                posts: Vec::new(),
            });
        }
        Err(e) => {
            error!("Failed to load author: {}", e);
            return LoadState::Failed(PageError::fetch("Failed to load author", e));
        }
    };

    let posts = source.posts_by_author(author.id).await.unwrap_or_else(|e| {
        warn!("Failed to load posts for author {}: {}", author.id, e);
        Vec::new()
    });

    LoadState::Ready(AuthorProfile {
        author: Some(author),
        posts,
    })
}
