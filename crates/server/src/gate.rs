use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use domain::CommentForm;

type SubmitKey = (String, String, String);

/// 记录正在写入的评论，同一文章、同一作者、同一内容在途时拒绝再次提交
#[derive(Clone, Default)]
pub struct SubmitGate {
    inflight: Arc<Mutex<HashSet<SubmitKey>>>,
}

/// 持有期间占住对应的提交；释放时自动移除
pub struct SubmitPermit {
    gate: SubmitGate,
    key: SubmitKey,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_enter(&self, post: &str, form: &CommentForm) -> Option<SubmitPermit> {
        let key = (
            post.trim().to_string(),
            form.user_name.trim().to_string(),
            form.content.trim().to_string(),
        );
        let mut set = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(key.clone()) {
            return None;
        }
        Some(SubmitPermit {
            gate: self.clone(),
            key,
        })
    }
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.gate
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
