use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Platform answer to "may we show native notifications?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Unset,
    /// The platform has no native notifications at all.
    Unsupported,
}

/// Native notification capability. Implementations can pop up desktop
/// notifications, apply a fixed permission policy, or show nothing.
#[async_trait]
pub trait NativeNotifier: Send + Sync {
    fn permission(&self) -> Permission;

    /// Ask the user. Only `Granted` or `Denied` are meaningful answers.
    async fn request_permission(&self) -> Permission;

    fn display(&self, title: &str, body: &str, icon: &str);
}

/// Desktop notifications through the OS notification daemon. Desktops do not
/// prompt for permission, so it is always granted.
pub struct DesktopNotifier;

#[async_trait]
impl NativeNotifier for DesktopNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn display(&self, title: &str, body: &str, icon: &str) {
        // Detached; failures are logged on the blocking thread
        let _ = show_desktop(title, body, icon);
    }
}

/// Show on tokio's blocking pool; talking to the notification daemon can
/// block. Must be called from inside the runtime.
fn show_desktop(title: &str, body: &str, icon: &str) -> JoinHandle<()> {
    let title = title.to_string();
    let body = body.to_string();
    let icon = icon.to_string();

    tokio::task::spawn_blocking(move || {
        if let Err(e) = notify_rust::Notification::new()
            .summary(&title)
            .body(&body)
            .icon(&icon)
            .show()
        {
            warn!("Native notification failed: {}", e);
        }
    })
}

/// For headless hosts: reports native notifications as unsupported.
pub struct SilentNotifier;

#[async_trait]
impl NativeNotifier for SilentNotifier {
    fn permission(&self) -> Permission {
        Permission::Unsupported
    }

    async fn request_permission(&self) -> Permission {
        Permission::Unsupported
    }

    fn display(&self, title: &str, _body: &str, _icon: &str) {
        debug!(title, "Native notification suppressed");
    }
}

/// Starts out `Unset` and answers the first request with a fixed decision,
/// remembering it afterwards. Displays go to the wrapped notifier.
pub struct PolicyNotifier {
    answer: Permission,
    state: Mutex<Permission>,
    inner: Arc<dyn NativeNotifier>,
}

impl PolicyNotifier {
    pub fn new(grant: bool, inner: Arc<dyn NativeNotifier>) -> Self {
        Self {
            answer: if grant { Permission::Granted } else { Permission::Denied },
            state: Mutex::new(Permission::Unset),
            inner,
        }
    }
}

#[async_trait]
impl NativeNotifier for PolicyNotifier {
    fn permission(&self) -> Permission {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn request_permission(&self) -> Permission {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = self.answer;
        *state
    }

    fn display(&self, title: &str, body: &str, icon: &str) {
        self.inner.display(title, body, icon);
    }
}
