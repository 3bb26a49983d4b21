use super::handlers::{api, author, health, home, posts};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

fn cors_layer(allowed_origins: &str) -> CorsLayer {
    let any = || {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_origin(Any)
            .allow_headers(Any)
    };

    if allowed_origins == "*" {
        return any();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
        any()
    } else {
        tracing::info!("CORS enabled for origins: {:?}", origins);
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_origin(origins)
            .allow_headers(Any)
    }
}

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    Router::new()
        // 页面
        .route("/", get(home::index))
        .route("/post", get(posts::missing_id))
        .route("/post/", get(posts::missing_id))
        .route("/post/:id", get(posts::show))
        .route("/post/:id/comments", post(posts::submit_comment))
        .route("/author", get(author::profile))
        // JSON
        .route("/api/posts", get(api::list_posts))
        .route("/api/posts/:id", get(api::get_post))
        .route("/api/posts/:id/comments", post(api::post_comment))
        .route("/api/author", get(api::get_author))
        .route("/healthz", get(health::healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}
