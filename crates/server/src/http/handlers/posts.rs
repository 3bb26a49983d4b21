use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use domain::{CommentForm, Notice};
use pages::{
    DetailSession, Navigation, PostDetailPage, SubmitOutcome, SubmitRejected, SUBMIT_OK,
};
use serde::Deserialize;

use crate::state::AppState;
use crate::views::{render, render_page_error, PostTemplate};

pub const DUPLICATE_SUBMIT: &str = "This comment is already being posted.";

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    /// 提交成功后重定向带回的标记
    #[serde(default)]
    pub posted: bool,
}

// /post 不带 ID
pub async fn missing_id() -> Redirect {
    Redirect::to("/")
}

pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Response {
    let session = DetailSession::new(state.db.clone());
    if session.navigate(Some(raw_id.as_str())).await == Navigation::Redirect {
        return Redirect::to("/").into_response();
    }

    let mut page = session.snapshot();
    if query.posted && page.detail().is_some() {
        page.notice = Some(Notice::Success(SUBMIT_OK.to_string()));
    }
    render_detail(&state, &page, StatusCode::OK)
}

/// 成功后 303 回到详情页，刷新不会重复提交；失败时带着原输入重新渲染
pub async fn submit_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<CommentForm>,
) -> Response {
    let session = DetailSession::new(state.db.clone());
    if session.navigate(Some(raw_id.as_str())).await == Navigation::Redirect {
        return Redirect::to("/").into_response();
    }

    let Some(_permit) = state.submissions.try_enter(&raw_id, &form) else {
        tracing::info!("Duplicate comment on post {} while one is in flight", raw_id.trim());
        let mut page = session.snapshot();
        page.form = form;
        page.notice = Some(Notice::Prompt(DUPLICATE_SUBMIT.to_string()));
        return render_detail(&state, &page, StatusCode::CONFLICT);
    };

    let status = match session.submit(form).await {
        SubmitOutcome::Posted(_) => {
            let target = match session.snapshot().route() {
                Some(id) => format!("/post/{}?posted=true#comments", id),
                None => "/".to_string(),
            };
            return Redirect::to(&target).into_response();
        }
        SubmitOutcome::Rejected(SubmitRejected::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
        // 文章本身没加载成功，按页面错误渲染
        SubmitOutcome::Rejected(SubmitRejected::NotReady) => StatusCode::OK,
        SubmitOutcome::Rejected(SubmitRejected::InFlight) | SubmitOutcome::Discarded => {
            StatusCode::CONFLICT
        }
    };
    render_detail(&state, &session.snapshot(), status)
}

fn render_detail(state: &AppState, page: &PostDetailPage, status: StatusCode) -> Response {
    if let Some(view) = PostTemplate::from_page(&state.site_title, page) {
        return render(view, status);
    }
    match page.state.error() {
        Some(e) => render_page_error(&state.site_title, e),
        None => {
            tracing::error!("Detail page for {:?} never settled", page.route());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
