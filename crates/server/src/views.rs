use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use domain::{display, Notice, PageError, Post, PostWithAuthor};
use pages::{AuthorProfile, PostDetailPage};

pub fn render<T: Template>(template: T, status: StatusCode) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering failed").into_response()
        }
    }
}

// --- 首页 ---

pub struct PostCard {
    pub id: i64,
    pub title: String,
    pub cover: Option<String>,
    pub excerpt: String,
    pub author_name: String,
    pub date: String,
}

impl From<&PostWithAuthor> for PostCard {
    fn from(p: &PostWithAuthor) -> Self {
        PostCard {
            id: p.post.id.get(),
            title: p.post.title.clone(),
            cover: p.post.cover_image_url.clone(),
            excerpt: display::excerpt(&p.post),
            author_name: p.author_name().to_string(),
            date: display::format_date(&p.post.created_at),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub site_title: &'a str,
    pub cards: Vec<PostCard>,
}

// --- 详情页 ---

pub struct CommentView {
    pub id: i64,
    pub user_name: String,
    pub content: String,
    pub created_at: String,
}

pub struct NoticeView {
    pub kind: &'static str,
    pub message: String,
}

impl From<&Notice> for NoticeView {
    fn from(n: &Notice) -> Self {
        let kind = match n {
            Notice::Success(_) => "success",
            Notice::Failure(_) => "failure",
            Notice::Prompt(_) => "prompt",
        };
        NoticeView {
            kind,
            message: n.message().to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate<'a> {
    pub site_title: &'a str,
    pub post_id: i64,
    pub title: String,
    pub author_name: String,
    pub author_bio: String,
    pub author_avatar: String,
    pub published_at: String,
    pub cover: Option<String>,
    pub paragraphs: Vec<String>,
    pub comments: Vec<CommentView>,
    pub notice: Option<NoticeView>,
    pub form_name: String,
    pub form_email: String,
    pub form_content: String,
}

impl<'a> PostTemplate<'a> {
    /// 只有 ready 状态才有可渲染的正文
    pub fn from_page(site_title: &'a str, page: &PostDetailPage) -> Option<Self> {
        let detail = page.detail()?;
        let p = &detail.post;
        Some(PostTemplate {
            site_title,
            post_id: p.post.id.get(),
            title: p.post.title.clone(),
            author_name: p.author_name().to_string(),
            author_bio: p.author_bio().to_string(),
            author_avatar: p.author_avatar().to_string(),
            published_at: display::format_datetime(&p.post.created_at),
            cover: p.post.cover_image_url.clone(),
            paragraphs: display::paragraphs(&p.post.content)
                .into_iter()
                .map(str::to_string)
                .collect(),
            comments: detail
                .comments
                .iter()
                .map(|c| CommentView {
                    id: c.id,
                    user_name: c.user_name.clone(),
                    content: c.content.clone(),
                    created_at: display::format_datetime(&c.created_at),
                })
                .collect(),
            notice: page.notice.as_ref().map(Into::into),
            form_name: page.form.user_name.clone(),
            form_email: page.form.email.clone(),
            form_content: page.form.content.clone(),
        })
    }
}

// --- 作者页 ---

pub struct AuthorPostRow {
    pub id: i64,
    pub title: String,
    pub date: String,
}

impl From<&Post> for AuthorPostRow {
    fn from(p: &Post) -> Self {
        AuthorPostRow {
            id: p.id.get(),
            title: p.title.clone(),
            date: display::format_date(&p.created_at),
        }
    }
}

#[derive(Template)]
#[template(path = "author.html")]
pub struct AuthorTemplate<'a> {
    pub site_title: &'a str,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub email: Option<String>,
    pub posts: Vec<AuthorPostRow>,
}

impl<'a> AuthorTemplate<'a> {
    pub fn from_profile(site_title: &'a str, profile: &AuthorProfile) -> Option<Self> {
        let author = profile.author.as_ref()?;
        Some(AuthorTemplate {
            site_title,
            name: author.name.clone(),
            avatar: author.display_avatar().to_string(),
            bio: author.display_bio().to_string(),
            email: author.email.clone(),
            posts: profile.posts.iter().map(Into::into).collect(),
        })
    }
}

// --- 提示 / 错误页 ---

#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageTemplate<'a> {
    pub site_title: &'a str,
    pub message: String,
    pub is_error: bool,
    pub show_home_link: bool,
}

impl<'a> MessageTemplate<'a> {
    pub fn info(site_title: &'a str, message: impl Into<String>) -> Self {
        Self {
            site_title,
            message: message.into(),
            is_error: false,
            show_home_link: false,
        }
    }

    pub fn error(site_title: &'a str, message: impl Into<String>) -> Self {
        Self {
            site_title,
            message: message.into(),
            is_error: true,
            show_home_link: true,
        }
    }
}

pub fn page_error_status(e: &PageError) -> StatusCode {
    match e {
        PageError::NotFound => StatusCode::NOT_FOUND,
        PageError::Fetch { .. } => StatusCode::BAD_GATEWAY,
    }
}

pub fn render_page_error(site_title: &str, e: &PageError) -> Response {
    render(MessageTemplate::error(site_title, e.to_string()), page_error_status(e))
}
