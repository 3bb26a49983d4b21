use domain::{CommentForm, PageStatus};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::state::{PostDetailPage, RouteChange, SubmitOutcome};
use crate::traits::BlogSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Redirect,
    Unchanged,
    /// 两个请求都已落定，页面进入 ready 或 error
    Settled(PageStatus),
    /// 被更新的导航取代，本次结果未应用
    Superseded,
}

/// 一个详情页实例：持有页面状态，驱动加载与评论提交
///
/// 状态锁只在同步片段内持有，从不跨越 await。
pub struct DetailSession<S: ?Sized> {
    source: Arc<S>,
    page: Mutex<PostDetailPage>,
    inflight: Mutex<Option<CancellationToken>>,
}

impl<S: BlogSource + ?Sized> DetailSession<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            page: Mutex::new(PostDetailPage::new()),
            inflight: Mutex::new(None),
        }
    }

    fn page(&self) -> MutexGuard<'_, PostDetailPage> {
        self.page.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> PostDetailPage {
        self.page().clone()
    }

    // 新的加载开始时取消上一次仍在进行的请求
    fn replace_token(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let mut slot = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(prev) = slot.replace(token.clone()) {
            prev.cancel();
        }
        token
    }

    pub async fn navigate(&self, raw_id: Option<&str>) -> Navigation {
        let change = self.page().observe_route(raw_id);
        let ticket = match change {
            RouteChange::Redirect => return Navigation::Redirect,
            RouteChange::Unchanged => return Navigation::Unchanged,
            RouteChange::Invalid => {
                self.replace_token();
                return Navigation::Settled(PageStatus::Error);
            }
            RouteChange::Load(t) => t,
        };

        let token = self.replace_token();
        let id = ticket.post_id;
        info!("Loading post {}", id);

        let fetch = async {
            tokio::join!(
                self.source.post_with_author(id),
                self.source.comments_for(id)
            )
        };

        let (post, comments) = tokio::select! {
            _ = token.cancelled() => {
                debug!("Load of post {} cancelled by a newer navigation", id);
                return Navigation::Superseded;
            }
            res = fetch => res,
        };

        let mut page = self.page();
        if page.apply_loaded(ticket, post, comments) {
            Navigation::Settled(page.state.status())
        } else {
            Navigation::Superseded
        }
    }

    pub async fn submit(&self, form: CommentForm) -> SubmitOutcome {
        let begun = self.page().begin_submit(form);
        let (ticket, row) = match begun {
            Ok(v) => v,
            Err(rejected) => {
                debug!("Comment submission rejected: {:?}", rejected);
                return SubmitOutcome::Rejected(rejected);
            }
        };

        info!("Posting comment on post {} as '{}'", ticket.post_id, row.user_name);
        let result = self.source.insert_comment(&row).await;
        self.page().finish_submit(ticket, result)
    }
}
