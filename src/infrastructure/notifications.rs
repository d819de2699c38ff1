//! Desktop notifications for failed gallery operations.
//!
//! Without the `notify` feature every notification is only logged.

use tracing::debug;

use crate::domain::ports::NotificationPort;

/// Longest body shown in a desktop notification, in characters.
const MAX_BODY_CHARS: usize = 200;

/// Desktop notification service.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotificationService {
    enabled: bool,
}

impl DesktopNotificationService {
    /// Creates the service; a disabled service only logs.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: enabled && cfg!(feature = "notify"),
        }
    }

    /// Returns whether notifications reach the desktop.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg_attr(not(feature = "notify"), allow(dead_code))]
fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_CHARS {
        return body.to_string();
    }
    let mut short: String = body.chars().take(MAX_BODY_CHARS - 1).collect();
    short.push('…');
    short
}

impl NotificationPort for DesktopNotificationService {
    fn send(&self, title: &str, body: &str) {
        if !self.enabled {
            debug!(title = %title, "Desktop notifications disabled");
            return;
        }

        #[cfg(feature = "notify")]
        {
            let title = title.to_string();
            let body = truncate_body(body);

            tokio::task::spawn_blocking(move || {
                if let Err(e) = notify_rust::Notification::new()
                    .summary(&title)
                    .body(&body)
                    .appname(crate::NAME)
                    .show()
                {
                    tracing::warn!("Failed to show notification: {}", e);
                }
            });
        }
    }
}
