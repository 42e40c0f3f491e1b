//! Non-blocking notifications for the owner (toasts in the browser build).

use std::collections::VecDeque;

use serde::Serialize;

/// Oldest notices are dropped past this many.
const MAX_QUEUED: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Celebration,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice. A repeat of the most recent one is dropped so a
    /// failing store doesn't flood the owner.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let notice = Notice {
            kind,
            message: message.into(),
        };
        if self.queue.back() == Some(&notice) {
            return;
        }
        if self.queue.len() == MAX_QUEUED {
            self.queue.pop_front();
        }
        self.queue.push_back(notice);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Info, message);
    }

    pub fn celebrate(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Celebration, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Warning, message);
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let mut n = Notices::new();
        n.warn("storage is full");
        n.warn("storage is full");
        n.info("fed");
        n.warn("storage is full");
        assert_eq!(n.len(), 3);
    }

    #[test]
    fn test_bounded() {
        let mut n = Notices::new();
        for i in 0..100 {
            n.info(format!("notice {i}"));
        }
        assert_eq!(n.len(), MAX_QUEUED);
        let drained = n.drain();
        assert_eq!(drained.last().unwrap().message, "notice 99");
        assert!(n.is_empty());
    }
}
