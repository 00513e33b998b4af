//! Transient auto-dismissing notices.

use std::time::{Duration, Instant};

/// How long a toast stays up.
pub const TOAST_DURATION: Duration = Duration::from_secs(2);

/// What a toast is telling the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    EventCreated,
    DropRejected,
}

impl ToastKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EventCreated => "Event created!",
            Self::DropRejected => "Too far. Upgrade to Premium to extend your radius.",
        }
    }
}

/// One visible toast.
///
/// Each instance owns its dismissal deadline, so the pending dismissal of an
/// old toast can never take down a newer one that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, now: Instant) -> Self {
        Self { kind, shown_at: now }
    }

    pub fn deadline(&self) -> Instant {
        self.shown_at + TOAST_DURATION
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline()
    }
}

/// The visible toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, kind: ToastKind, now: Instant) {
        self.toasts.push(Toast::new(kind, now));
    }

    /// Sweep expired toasts. Each goes by its own deadline.
    pub fn tick(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.is_expired(now));
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_visible(&self, kind: ToastKind) -> bool {
        self.toasts.iter().any(|toast| toast.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_visible_until_its_deadline() {
        let t0 = Instant::now();
        let mut stack = ToastStack::new();
        stack.show(ToastKind::DropRejected, t0);

        stack.tick(t0 + Duration::from_millis(1_900));
        assert!(stack.is_visible(ToastKind::DropRejected));

        stack.tick(t0 + Duration::from_millis(2_100));
        assert!(!stack.is_visible(ToastKind::DropRejected));
        assert!(stack.visible().is_empty());
    }

    #[test]
    fn test_overlapping_toasts_expire_independently() {
        let t0 = Instant::now();
        let mut stack = ToastStack::new();
        stack.show(ToastKind::DropRejected, t0);
        stack.show(ToastKind::DropRejected, t0 + Duration::from_millis(1_500));

        // The first toast's deadline passes; the newer one must survive it.
        stack.tick(t0 + Duration::from_millis(2_100));
        assert_eq!(stack.visible().len(), 1);

        stack.tick(t0 + Duration::from_millis(3_600));
        assert!(stack.visible().is_empty());
    }

    #[test]
    fn test_kinds_are_tracked_separately() {
        let t0 = Instant::now();
        let mut stack = ToastStack::new();
        stack.show(ToastKind::EventCreated, t0);

        assert!(stack.is_visible(ToastKind::EventCreated));
        assert!(!stack.is_visible(ToastKind::DropRejected));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ToastKind::EventCreated.message(), "Event created!");
        assert!(ToastKind::DropRejected.message().starts_with("Too far"));
    }
}
