use std::cell::RefCell;

use crate::foundation::core::{DatasetKind, Year};

/// A user-facing report about a layer that could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Dataset concerned.
    pub kind: DatasetKind,
    /// Year concerned.
    pub year: Year,
    /// Human-readable message.
    pub message: String,
}

/// Receiver for [`Notice`]s, e.g. a toast queue in a UI.
pub trait NoticeSink {
    /// Deliver one notice.
    fn notify(&self, notice: Notice);
}

/// Sink that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn notify(&self, notice: Notice) {
        tracing::warn!(
            kind = %notice.kind,
            year = notice.year,
            "{}",
            notice.message
        );
    }
}

/// In-memory sink for tests and headless use.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: RefCell<Vec<Notice>>,
}

impl NoticeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every notice received so far.
    pub fn snapshot(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    /// Number of notices received.
    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    /// `true` when nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }
}

impl NoticeSink for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}
