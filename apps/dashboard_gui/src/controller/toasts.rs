use std::time::{Duration, Instant};

use shared::domain::RoundStatus;

/// Key of the single round-status toast; a newer status replaces it.
pub const ROUND_STATUS_TOAST: &str = "round-status";

pub const NOTICE_TTL: Duration = Duration::from_secs(5);
pub const ROUND_STATUS_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub key: Option<&'static str>,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, message: impl Into<String>, ttl: Duration, now: Instant) {
        self.items.push(Toast {
            key: None,
            message: message.into(),
            expires_at: now + ttl,
        });
    }

    pub fn push_keyed(
        &mut self,
        key: &'static str,
        message: impl Into<String>,
        ttl: Duration,
        now: Instant,
    ) {
        self.items.retain(|toast| toast.key != Some(key));
        self.items.push(Toast {
            key: Some(key),
            message: message.into(),
            expires_at: now + ttl,
        });
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|toast| toast.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Message for a round-status change. Only a change into a running round
/// is announced.
pub fn round_status_toast(previous: RoundStatus, current: RoundStatus) -> Option<String> {
    if current == previous || !current.is_known() {
        return None;
    }
    Some(format!("{} in progress", current.label()))
}

#[cfg(test)]
#[path = "../tests/toasts_tests.rs"]
mod tests;
