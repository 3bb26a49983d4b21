use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::{Comment, CommentForm, LoadState, PageError, PostWithAuthor};
use pages::{
    load_author_page, load_home, AuthorProfile, DetailSession, Navigation, PostDetail,
    SubmitOutcome, SubmitRejected,
};
use storage::Db;

use super::posts::DUPLICATE_SUBMIT;
use crate::state::AppState;
use crate::views::page_error_status;

type ApiError = (StatusCode, String);

fn page_error(e: &PageError) -> ApiError {
    (page_error_status(e), e.to_string())
}

fn settle<T>(state: LoadState<T>) -> Result<T, ApiError> {
    match state {
        LoadState::Ready(v) => Ok(v),
        LoadState::Failed(e) => Err(page_error(&e)),
        LoadState::Idle | LoadState::Loading => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Page did not finish loading".to_string(),
        )),
    }
}

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostWithAuthor>>, ApiError> {
    settle(load_home(state.db.as_ref()).await).map(Json)
}

async fn open_post(state: &AppState, raw_id: &str) -> Result<DetailSession<Db>, ApiError> {
    let session = DetailSession::new(state.db.clone());
    if session.navigate(Some(raw_id)).await == Navigation::Redirect {
        return Err((StatusCode::BAD_REQUEST, "Missing post id".to_string()));
    }
    Ok(session)
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PostDetail>, ApiError> {
    let session = open_post(&state, &raw_id).await?;
    settle(session.snapshot().state).map(Json)
}

/// 成功时返回服务端回显的新评论行
pub async fn post_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(form): Json<CommentForm>,
) -> Result<(StatusCode, Json<Vec<Comment>>), ApiError> {
    let session = open_post(&state, &raw_id).await?;
    let Some(_permit) = state.submissions.try_enter(&raw_id, &form) else {
        return Err((StatusCode::CONFLICT, DUPLICATE_SUBMIT.to_string()));
    };

    match session.submit(form).await {
        SubmitOutcome::Posted(n) => {
            let page = session.snapshot();
            let comments = page
                .detail()
                .map(|d| d.comments[d.comments.len().saturating_sub(n)..].to_vec())
                .unwrap_or_default();
            Ok((StatusCode::CREATED, Json(comments)))
        }
        SubmitOutcome::Failed(message) => Err((StatusCode::BAD_GATEWAY, message)),
        SubmitOutcome::Rejected(SubmitRejected::Invalid(e)) => {
            Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
        SubmitOutcome::Rejected(SubmitRejected::NotReady) => match session.snapshot().state.error() {
            Some(e) => Err(page_error(e)),
            None => Err((StatusCode::CONFLICT, "Post is not loaded".to_string())),
        },
        SubmitOutcome::Rejected(SubmitRejected::InFlight) | SubmitOutcome::Discarded => Err((
            StatusCode::CONFLICT,
            "Comment submission was superseded".to_string(),
        )),
    }
}

pub async fn get_author(State(state): State<AppState>) -> Result<Json<AuthorProfile>, ApiError> {
    settle(load_author_page(state.db.as_ref()).await).map(Json)
}
