use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{NewComment, PostId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in your name and comment.")]
    MissingFields,
}

/// 评论表单的原始输入，失败时原样保留以便用户重试
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub content: String,
}

impl CommentForm {
    pub fn validate(&self, post_id: PostId) -> Result<NewComment, FormError> {
        let user_name = self.user_name.trim();
        let content = self.content.trim();
        if user_name.is_empty() || content.is_empty() {
            return Err(FormError::MissingFields);
        }

        let email = self.email.trim();
        Ok(NewComment {
            post_id,
            user_name: user_name.to_string(),
            content: content.to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, content: &str) -> CommentForm {
        CommentForm {
            user_name: name.into(),
            email: email.into(),
            content: content.into(),
        }
    }

    #[test]
    fn blank_fields_are_rejected() {
        let id = PostId::new_unchecked(1);
        assert_eq!(form("", "", "hi").validate(id), Err(FormError::MissingFields));
        assert_eq!(form("Ada", "", "   ").validate(id), Err(FormError::MissingFields));
        assert_eq!(form(" \t", "a@b.c", "\n").validate(id), Err(FormError::MissingFields));
    }

    #[test]
    fn valid_form_builds_trimmed_row() {
        let row = form("  Ada ", " ", " Nice post\n")
            .validate(PostId::new_unchecked(9))
            .unwrap();
        assert_eq!(row.post_id.get(), 9);
        assert_eq!(row.user_name, "Ada");
        assert_eq!(row.content, "Nice post");
        assert_eq!(row.email, None);

        let row = form("Ada", "ada@example.com", "x")
            .validate(PostId::new_unchecked(9))
            .unwrap();
        assert_eq!(row.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn clear_resets_every_field() {
        let mut f = form("a", "b", "c");
        f.clear();
        assert_eq!(f, CommentForm::default());
    }
}
