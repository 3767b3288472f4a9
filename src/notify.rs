use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A fire-and-forget user-facing message. The UI shows the newest notice as
/// a transient banner; senders never wait on delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info<S: Into<String>>(text: S) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn success<S: Into<String>>(text: S) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error<S: Into<String>>(text: S) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

pub trait Notify: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Shared notice queue. The controller pushes through the `Notify` trait and
/// the UI drains on its tick.
#[derive(Default, Clone)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&self) -> Option<Notice> {
        self.queue.lock().pop_front()
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.queue.lock().drain(..).collect()
    }
}

impl Notify for Notifications {
    fn notify(&self, notice: Notice) {
        self.queue.lock().push_back(notice);
    }
}

/// Test double that records every notice it receives.
#[derive(Default)]
pub struct Recorder {
    notices: Mutex<Vec<Notice>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().last().cloned()
    }
}

impl Notify for Recorder {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_preserves_order() {
        let notifications = Notifications::new();
        notifications.notify(Notice::info("first"));
        notifications.notify(Notice::error("second"));

        assert_eq!(notifications.pop().unwrap().text, "first");
        assert_eq!(notifications.pop().unwrap().text, "second");
        assert!(notifications.pop().is_none());
    }

    #[test]
    fn drain_empties_the_queue() {
        let notifications = Notifications::new();
        notifications.notify(Notice::success("done"));
        let drained = notifications.drain();
        assert_eq!(drained.len(), 1);
        assert!(notifications.pop().is_none());
    }
}
