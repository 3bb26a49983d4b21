use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::LoadState;
use pages::load_author_page;

use crate::state::AppState;
use crate::views::{render, render_page_error, AuthorTemplate, MessageTemplate};

const NO_AUTHOR: &str = "No author information yet";

pub async fn profile(State(state): State<AppState>) -> Response {
    match load_author_page(state.db.as_ref()).await {
        LoadState::Ready(profile) => match AuthorTemplate::from_profile(&state.site_title, &profile) {
            Some(page) => render(page, StatusCode::OK),
            None => render(MessageTemplate::info(&state.site_title, NO_AUTHOR), StatusCode::OK),
        },
        LoadState::Failed(e) => render_page_error(&state.site_title, &e),
        LoadState::Idle | LoadState::Loading => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
