use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::LoadState;
use pages::load_home;

use crate::state::AppState;
use crate::views::{render, render_page_error, HomeTemplate, PostCard};

pub async fn index(State(state): State<AppState>) -> Response {
    match load_home(state.db.as_ref()).await {
        LoadState::Ready(posts) => render(
            HomeTemplate {
                site_title: &state.site_title,
                cards: posts.iter().map(PostCard::from).collect(),
            },
            StatusCode::OK,
        ),
        LoadState::Failed(e) => render_page_error(&state.site_title, &e),
        LoadState::Idle | LoadState::Loading => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
