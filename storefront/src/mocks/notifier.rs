//! Recording notifier for testing.

use crate::traits::{Notice, NoticeLevel, Notifier};
use parking_lot::Mutex;
use std::sync::Arc;

/// Notifier that keeps every notice for later assertions.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices.lock().iter().map(|n| n.level).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}
