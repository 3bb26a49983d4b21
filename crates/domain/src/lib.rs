mod form;
mod models;
mod page;
pub mod display;

pub use form::{CommentForm, FormError};
pub use models::{Author, AuthorSummary, Comment, NewComment, Post, PostId, PostStatus, PostWithAuthor};
pub use page::{LoadState, Notice, PageError, PageStatus};
