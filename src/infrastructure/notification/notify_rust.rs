//! Cross-platform notification adapter using notify-rust

use async_trait::async_trait;
#[cfg(all(unix, not(target_os = "macos")))]
use notify_rust::Urgency;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// How long connection notices stay on screen
const CONNECTION_NOTICE_MS: u32 = 3000;

/// Connection changes fade out; errors stay until dismissed
fn timeout_for(icon: NotificationIcon) -> Timeout {
    match icon {
        NotificationIcon::Connected | NotificationIcon::Disconnected => {
            Timeout::Milliseconds(CONNECTION_NOTICE_MS)
        }
        NotificationIcon::Error => Timeout::Never,
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn urgency_for(icon: NotificationIcon) -> Urgency {
    match icon {
        NotificationIcon::Connected | NotificationIcon::Disconnected => Urgency::Low,
        NotificationIcon::Error => Urgency::Critical,
    }
}

fn build_notification(
    app_name: &str,
    title: &str,
    message: &str,
    icon: NotificationIcon,
) -> Notification {
    let mut notification = Notification::new();
    notification
        .appname(app_name)
        .summary(title)
        .body(message)
        .icon(icon.icon_name())
        .timeout(timeout_for(icon));
    #[cfg(all(unix, not(target_os = "macos")))]
    notification.urgency(urgency_for(icon));
    notification
}

/// Cross-platform notifier using notify-rust
pub struct NotifyRustNotifier {
    /// Application name for notifications
    app_name: String,
}

impl NotifyRustNotifier {
    /// Create a new notify-rust notifier
    pub fn new() -> Self {
        Self {
            app_name: "VoiceForward".to_string(),
        }
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let notification = build_notification(&self.app_name, title, message, icon);

        // show() talks to the notification server synchronously
        tokio::task::spawn_blocking(move || {
            notification
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}
