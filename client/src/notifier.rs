//! Single-slot notification channel.
//!
//! At most one notification is live. Every `notify` overwrites the slot and
//! restarts the expiry timer; the previous timer is aborted and, should it
//! still run, only clears the slot if it belongs to the notification it was
//! started for.
//!
//! Outside a Tokio runtime there is nothing to spawn a timer on, so the
//! notification carries a deadline instead and expires the next time the
//! slot is read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use barra_common::notification::{Notification, NotificationKind, NOTIFICATION_TTL_MS};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long a notification stays live.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(NOTIFICATION_TTL_MS);

#[derive(Debug)]
pub struct Notifier {
    slot: Arc<watch::Sender<Option<Notification>>>,
    generation: Arc<AtomicU64>,
    expiry: Option<JoinHandle<()>>,
    /// Set instead of `expiry` when `notify` ran without a runtime.
    deadline: Mutex<Option<Instant>>,
    ttl: Duration,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
            generation: Arc::new(AtomicU64::new(0)),
            expiry: None,
            deadline: Mutex::new(None),
            ttl,
        }
    }

    /// Show `message`, replacing whatever is live, and (re)start the timer.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        if let Some(previous) = self.expiry.take() {
            previous.abort();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let notification = Notification::new(message, kind);
        tracing::debug!(kind = ?notification.kind, message = %notification.message, "notify");
        self.slot.send_replace(Some(notification));

        let deadline = self.deadline.get_mut().unwrap_or_else(PoisonError::into_inner);
        let Ok(runtime) = Handle::try_current() else {
            *deadline = Some(Instant::now() + self.ttl);
            return;
        };
        *deadline = None;

        let slot = Arc::clone(&self.slot);
        let current = Arc::clone(&self.generation);
        let ttl = self.ttl;
        self.expiry = Some(runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            slot.send_if_modified(|live| {
                if live.is_some() && current.load(Ordering::SeqCst) == generation {
                    *live = None;
                    true
                } else {
                    false
                }
            });
        }));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Error);
    }

    /// The live notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.expire_overdue();
        self.slot.borrow().clone()
    }

    pub fn is_idle(&self) -> bool {
        self.expire_overdue();
        self.slot.borrow().is_none()
    }

    fn expire_overdue(&self) {
        let mut deadline = self.deadline.lock().unwrap_or_else(PoisonError::into_inner);
        if deadline.is_some_and(|at| Instant::now() >= at) {
            *deadline = None;
            self.slot.send_if_modified(|live| live.take().is_some());
        }
    }

    /// Watch the slot; the receiver sees every overwrite and every expiry.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.slot.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(expiry) = self.expiry.take() {
            expiry.abort();
        }
    }
}
