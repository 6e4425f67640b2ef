//! Messages the core hands to its host.
//!
//! Controllers never render anything themselves; they queue [`HostEvent`]s
//! which the host drains after each operation and presents as it sees fit.

use std::collections::VecDeque;

/// Severity of a notification, mirroring toast variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            message: message.into(),
            variant: Variant::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            title: "Warning".to_string(),
            message: message.into(),
            variant: Variant::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            variant: Variant::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Show a notification to the user.
    Notify(Notification),
    /// Data shown by the host is out of date and should be reloaded.
    RefreshRequested,
}

/// Queue of pending host events, owned by a controller.
#[derive(Debug, Default)]
pub struct Outbox {
    events: VecDeque<HostEvent>,
}

impl Outbox {
    pub fn notify(&mut self, notification: Notification) {
        self.events.push_back(HostEvent::Notify(notification));
    }

    pub fn request_refresh(&mut self) {
        self.events.push_back(HostEvent::RefreshRequested);
    }

    pub fn drain(&mut self) -> Vec<HostEvent> {
        self.events.drain(..).collect()
    }
}
