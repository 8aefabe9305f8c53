//! Transient user-visible notices (errors that auto-dismiss).
//!
//! The host owns the timer: it schedules `dismiss(token)` for
//! `duration_ms` after a post. Only the token of the notice currently shown
//! can dismiss it, and nothing does after teardown, so a timer that fires
//! late is always harmless.

/// Identifies one posted notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeToken(u64);

impl NoticeToken {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub token: NoticeToken,
    pub duration_ms: u32,
}

#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    next_token: u64,
    duration_ms: u32,
    alive: bool,
}

impl NoticeBoard {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            current: None,
            next_token: 1,
            duration_ms,
            alive: true,
        }
    }

    /// Show `message`, replacing any current notice. Returns `None` once
    /// the board has been torn down.
    pub fn post(&mut self, message: impl Into<String>) -> Option<NoticeToken> {
        if !self.alive {
            return None;
        }
        let token = NoticeToken(self.next_token);
        self.next_token += 1;
        let message = message.into();
        log::debug!("notice {}: {message}", token.0);
        self.current = Some(Notice {
            message,
            token,
            duration_ms: self.duration_ms,
        });
        Some(token)
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Dismiss the notice identified by `token`. Stale tokens (superseded
    /// or after teardown) do nothing.
    pub fn dismiss(&mut self, token: NoticeToken) -> bool {
        if !self.alive {
            return false;
        }
        match &self.current {
            Some(notice) if notice.token == token => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the current notice and invalidate every outstanding token.
    pub fn teardown(&mut self) {
        self.alive = false;
        self.current = None;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}
