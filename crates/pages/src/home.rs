use domain::{LoadState, PageError, PostWithAuthor};
use tracing::{error, info};

use crate::traits::BlogSource;

pub type HomeState = LoadState<Vec<PostWithAuthor>>;

// 首页只有一次读取，没有路由参数，不需要代数保护
pub async fn load_home<S: BlogSource + ?Sized>(source: &S) -> HomeState {
    match source.published_posts().await {
        Ok(posts) => {
            info!("Loaded {} published post(s)", posts.len());
            LoadState::Ready(posts)
        }
        Err(e) => {
            error!("Failed to load posts: {}", e);
            LoadState::Failed(PageError::fetch("Failed to load posts", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSource;
    use domain::PageStatus;

    #[tokio::test]
    async fn listing_is_newest_first() {
        let src = FakeSource::with_posts(&[1, 3, 2]);
        let state = load_home(&src).await;
        let ids: Vec<i64> = state
            .ready()
            .unwrap()
            .iter()
            .map(|p| p.post.id.get())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn listing_failure_is_an_error_state() {
        let mut src = FakeSource::with_posts(&[1]);
        src.fail_posts = true;
        let state = load_home(&src).await;
        assert_eq!(state.status(), PageStatus::Error);
        assert_eq!(
            state.error().map(ToString::to_string).as_deref(),
            Some("Failed to load posts: posts unavailable")
        );
    }
}
