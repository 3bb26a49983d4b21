use domain::{
    Comment, CommentForm, FormError, LoadState, NewComment, Notice, PageError, PostId,
    PostWithAuthor,
};
use serde::Serialize;
use storage::StorageError;
use tracing::{debug, error, warn};

pub const SUBMIT_OK: &str = "Comment posted.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub post: PostWithAuthor,
    pub comments: Vec<Comment>,
}

/// 一次加载对应的票据；只有与当前代数一致的结果才会被应用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub post_id: PostId,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    pub post_id: PostId,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteChange {
    /// 缺少 ID，回到首页
    Redirect,
    Unchanged,
    /// ID 无法解析，已直接进入 NotFound，不发请求
    Invalid,
    Load(LoadTicket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    Invalid(FormError),
    InFlight,
    NotReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted(usize),
    Failed(String),
    Rejected(SubmitRejected),
    /// 请求期间已切换到别的文章，回显被丢弃
    Discarded,
}

/// 详情页的全部本地状态
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostDetailPage {
    route: Option<PostId>,
    #[serde(skip)]
    generation: u64,
    pub state: LoadState<PostDetail>,
    pub form: CommentForm,
    pub submitting: bool,
    pub notice: Option<Notice>,
}

impl PostDetailPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Option<PostId> {
        self.route
    }

    pub fn detail(&self) -> Option<&PostDetail> {
        self.state.ready()
    }

    /// 路由参数变化时才重新加载；同一 ID 的重复观察不触发请求
    pub fn observe_route(&mut self, raw: Option<&str>) -> RouteChange {
        let raw = match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(r) => r,
            None => return RouteChange::Redirect,
        };

        let id = match PostId::new(raw) {
            Ok(id) => id,
            Err(e) => {
                debug!("Rejecting route parameter '{}': {}", raw, e);
                self.reset_for(None);
                self.state = LoadState::Failed(PageError::NotFound);
                return RouteChange::Invalid;
            }
        };

        if self.route == Some(id) {
            return RouteChange::Unchanged;
        }

        self.reset_for(Some(id));
        self.state = LoadState::Loading;
        RouteChange::Load(LoadTicket {
            post_id: id,
            generation: self.generation,
        })
    }

    fn reset_for(&mut self, route: Option<PostId>) {
        self.generation += 1;
        self.route = route;
        self.form.clear();
        self.submitting = false;
        self.notice = None;
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// 两个请求都返回后合并结果；过期票据直接丢弃并返回 false
    pub fn apply_loaded(
        &mut self,
        ticket: LoadTicket,
        post: Result<PostWithAuthor, StorageError>,
        comments: Result<Vec<Comment>, StorageError>,
    ) -> bool {
        if !self.is_current(ticket.generation) {
            debug!("Discarding stale response for post {}", ticket.post_id);
            return false;
        }

        let post = match post {
            Ok(p) => p,
            Err(StorageError::NotFound) => {
                self.state = LoadState::Failed(PageError::NotFound);
                return true;
            }
            Err(e) => {
                error!("Failed to load post {}: {}", ticket.post_id, e);
                // 远程失败可重试：清掉路由，同一 ID 再次观察时重新加载
                self.route = None;
                self.state = LoadState::Failed(PageError::fetch("Failed to load post", e));
                return true;
            }
        };

        // 评论失败不影响正文展示
        let comments = comments.unwrap_or_else(|e| {
            warn!("Failed to load comments for post {}: {}", ticket.post_id, e);
            Vec::new()
        });

        self.state = LoadState::Ready(PostDetail { post, comments });
        true
    }

    pub fn begin_submit(
        &mut self,
        form: CommentForm,
    ) -> Result<(SubmitTicket, NewComment), SubmitRejected> {
        if self.submitting {
            return Err(SubmitRejected::InFlight);
        }
        let post_id = match (&self.state, self.route) {
            (LoadState::Ready(_), Some(id)) => id,
            _ => return Err(SubmitRejected::NotReady),
        };

        let row = form.validate(post_id);
        self.form = form;
        match row {
            Ok(row) => {
                self.submitting = true;
                self.notice = None;
                Ok((
                    SubmitTicket {
                        post_id,
                        generation: self.generation,
                    },
                    row,
                ))
            }
            Err(e) => {
                self.notice = Some(Notice::Prompt(e.to_string()));
                Err(SubmitRejected::Invalid(e))
            }
        }
    }

    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Vec<Comment>, StorageError>,
    ) -> SubmitOutcome {
        if !self.is_current(ticket.generation) {
            debug!("Discarding comment echo for post {}", ticket.post_id);
            return SubmitOutcome::Discarded;
        }
        self.submitting = false;

        match result {
            Ok(rows) => {
                let n = rows.len();
                if let Some(detail) = self.state.ready_mut() {
                    detail.comments.extend(rows);
                }
                self.form.clear();
                self.notice = Some(Notice::Success(SUBMIT_OK.to_string()));
                SubmitOutcome::Posted(n)
            }
            Err(e) => {
                error!("Failed to post comment on {}: {}", ticket.post_id, e);
                let message = format!("Failed to post comment: {}", e);
                self.notice = Some(Notice::Failure(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }
}
