use std::sync::Arc;
use storage::Db;

use crate::gate::SubmitGate;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Db>,
    pub site_title: Arc<str>,
    pub submissions: SubmitGate,
}

impl AppState {
    pub fn new(db: Db, site_title: &str) -> Self {
        Self {
            db: Arc::new(db),
            site_title: Arc::from(site_title),
            submissions: SubmitGate::new(),
        }
    }
}
