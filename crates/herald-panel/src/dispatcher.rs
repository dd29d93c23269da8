use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use uuid::Uuid;

use herald_types::{Acknowledgement, Category, NotificationPayload, PanelEvent};

use crate::error::{PanelError, PanelResult};
use crate::notifier::{NativeNotifier, Permission};
use crate::store::NotificationStore;
use crate::templates::template_for;

/// Where a single submission currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    PermissionPending,
    Persisting,
}

/// Told each time a dispatch moves to a new phase.
pub trait PhaseObserver: Send + Sync {
    fn enter(&self, phase: Phase);
}

impl PhaseObserver for () {
    fn enter(&self, _phase: Phase) {}
}

/// Records notifications and tells the parent view about them. Holds no
/// per-dispatch state; clones share the same collaborators and event channel.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    store: Arc<dyn NotificationStore>,
    notifier: Arc<dyn NativeNotifier>,
    icon: String,

    /// Parent view events; every subscriber gets every event
    events_tx: broadcast::Sender<PanelEvent>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        notifier: Arc<dyn NativeNotifier>,
        icon: impl Into<String>,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(DispatcherInner {
                store,
                notifier,
                icon: icon.into(),
                events_tx,
            }),
        }
    }

    /// Subscribe to panel events. Returns a broadcast receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.inner.events_tx.subscribe()
    }

    /// Send an event to every subscriber. Nobody listening is fine.
    pub fn broadcast(&self, event: PanelEvent) {
        let _ = self.inner.events_tx.send(event);
    }

    /// Append one payload to the store. A single attempt; failures propagate.
    pub async fn persist(&self, payload: NotificationPayload) -> PanelResult<Uuid> {
        let category = payload.category;
        self.inner.store.append(payload).await.map_err(|e| {
            error!(%category, "Failed to record notification: {:#}", e);
            PanelError::Store(e)
        })
    }

    /// Make sure native popups are allowed, asking the user if needed.
    ///
    /// Returns `Ok(false)` when the platform has no native notifications; the
    /// caller should still record the notification. A declined request is an
    /// error and nothing should be recorded.
    pub async fn ensure_permission(&self) -> PanelResult<bool> {
        match self.inner.notifier.permission() {
            Permission::Granted => Ok(true),
            Permission::Unsupported => Ok(false),
            Permission::Denied | Permission::Unset => {
                match self.inner.notifier.request_permission().await {
                    Permission::Granted => Ok(true),
                    answer => {
                        warn!(?answer, "Notification permission declined");
                        Err(PanelError::PermissionDeclined)
                    }
                }
            }
        }
    }

    /// One-click push of the fixed template for `keyword`.
    ///
    /// Unknown keywords are rejected before anything is shown or recorded.
    pub async fn quick_push(&self, keyword: &str, observer: &dyn PhaseObserver) -> PanelResult<Uuid> {
        observer.enter(Phase::Validating);
        let category: Category = keyword.parse().map_err(|_| {
            warn!(keyword, "Rejected quick-push for unknown category");
            PanelError::UnknownCategory(keyword.to_string())
        })?;
        let template = template_for(category);

        observer.enter(Phase::PermissionPending);
        match self.ensure_permission().await {
            Ok(true) => self.inner.notifier.display(template.title, template.body, &self.inner.icon),
            Ok(false) => {}
            Err(e) => {
                self.broadcast(PanelEvent::Acknowledged(Acknowledgement::PermissionDeclined));
                return Err(e);
            }
        }

        observer.enter(Phase::Persisting);
        let payload = template.payload(category, Utc::now().timestamp_millis());
        let id = match self.persist(payload).await {
            Ok(id) => id,
            Err(e) => {
                self.broadcast(PanelEvent::Acknowledged(Acknowledgement::Failed {
                    reason: e.to_string(),
                }));
                return Err(e);
            }
        };

        info!(%id, %category, "Quick-push notification recorded");
        self.broadcast(PanelEvent::NotificationAdded { id });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::SilentNotifier;
    use crate::test_support::{FakeNotifier, FakeStore};
    use herald_types::Priority;

    fn dispatcher(store: Arc<FakeStore>, notifier: Arc<dyn NativeNotifier>) -> Dispatcher {
        Dispatcher::new(store, notifier, "/icons/icon128.png")
    }

    #[tokio::test]
    async fn quick_push_every_category() {
        for category in Category::ALL {
            let store = Arc::new(FakeStore::new());
            let notifier = Arc::new(FakeNotifier::new(Permission::Granted, Permission::Granted));
            let d = dispatcher(store.clone(), notifier.clone());
            let mut rx = d.subscribe();

            let id = d.quick_push(category.as_str(), &()).await.unwrap();

            let appended = store.appended();
            assert_eq!(appended.len(), 1);
            assert_eq!(appended[0].category, category);
            assert_eq!(appended[0].priority, Priority::High);
            assert!(appended[0].timestamp.is_some());
            assert_eq!(appended[0].title, template_for(category).title);
            assert_eq!(notifier.displayed(), vec![template_for(category).title.to_string()]);
            assert_eq!(notifier.icons(), vec!["/icons/icon128.png".to_string()]);
            assert_eq!(rx.try_recv().unwrap(), PanelEvent::NotificationAdded { id });
        }
    }

    #[tokio::test]
    async fn asks_when_permission_unset() {
        let store = Arc::new(FakeStore::new());
        let notifier = Arc::new(FakeNotifier::new(Permission::Unset, Permission::Granted));
        let d = dispatcher(store.clone(), notifier.clone());

        d.quick_push("security", &()).await.unwrap();

        assert_eq!(notifier.requests(), 1);
        assert_eq!(notifier.displayed().len(), 1);
        assert_eq!(store.appended().len(), 1);
    }

    #[tokio::test]
    async fn declined_permission_records_nothing() {
        let store = Arc::new(FakeStore::new());
        let notifier = Arc::new(FakeNotifier::new(Permission::Denied, Permission::Denied));
        let d = dispatcher(store.clone(), notifier.clone());
        let mut rx = d.subscribe();

        let err = d.quick_push("governance", &()).await.unwrap_err();

        assert!(matches!(err, PanelError::PermissionDeclined));
        assert_eq!(notifier.requests(), 1);
        assert!(notifier.displayed().is_empty());
        assert!(store.appended().is_empty());
        assert_eq!(
            rx.try_recv().unwrap(),
            PanelEvent::Acknowledged(Acknowledgement::PermissionDeclined)
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unsupported_platform_still_records() {
        let store = Arc::new(FakeStore::new());
        let d = dispatcher(store.clone(), Arc::new(SilentNotifier));

        d.quick_push("upgrade", &()).await.unwrap();
        assert_eq!(store.appended().len(), 1);
    }

    #[tokio::test]
    async fn unknown_keyword_is_rejected() {
        let store = Arc::new(FakeStore::new());
        let notifier = Arc::new(FakeNotifier::new(Permission::Granted, Permission::Granted));
        let d = dispatcher(store.clone(), notifier.clone());

        let err = d.quick_push("weather", &()).await.unwrap_err();

        assert!(matches!(err, PanelError::UnknownCategory(ref k) if k == "weather"));
        assert!(notifier.displayed().is_empty());
        assert!(store.appended().is_empty());
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = Arc::new(FakeStore::failing());
        let notifier = Arc::new(FakeNotifier::new(Permission::Granted, Permission::Granted));
        let d = dispatcher(store, notifier);
        let mut rx = d.subscribe();

        let err = d.quick_push("airdrop", &()).await.unwrap_err();

        assert!(matches!(err, PanelError::Store(_)));
        assert!(matches!(
            rx.try_recv().unwrap(),
            PanelEvent::Acknowledged(Acknowledgement::Failed { .. })
        ));
    }
}
