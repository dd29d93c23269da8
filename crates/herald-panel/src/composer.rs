use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info};
use uuid::Uuid;

use herald_types::{Acknowledgement, PanelEvent};

use crate::dispatcher::{Dispatcher, Phase, PhaseObserver};
use crate::draft::{DraftUpdate, NotificationDraft};
use crate::error::{PanelError, PanelResult};

/// Owns one draft and turns submissions into dispatches.
///
/// At most one dispatch (custom submit or quick-push) runs at a time; a
/// second one started while the first is in flight fails with
/// [`PanelError::Busy`]. Field updates are refused the same way until the
/// dispatch finishes, so a reset after a successful submit never drops them.
pub struct Composer {
    draft: Mutex<NotificationDraft>,
    in_flight: AtomicBool,
    phase: PhaseCell,
    dispatcher: Dispatcher,
}

struct PhaseCell(AtomicU8);

impl PhaseCell {
    fn get(&self) -> Phase {
        match self.0.load(Ordering::Acquire) {
            1 => Phase::Validating,
            2 => Phase::PermissionPending,
            3 => Phase::Persisting,
            _ => Phase::Idle,
        }
    }
}

impl PhaseObserver for PhaseCell {
    fn enter(&self, phase: Phase) {
        let raw = match phase {
            Phase::Idle => 0,
            Phase::Validating => 1,
            Phase::PermissionPending => 2,
            Phase::Persisting => 3,
        };
        self.0.store(raw, Ordering::Release);
    }
}

/// Held for the length of one dispatch. Dropping it puts the composer back
/// to idle on every exit path.
struct InFlight<'a> {
    composer: &'a Composer,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.composer.phase.enter(Phase::Idle);
        self.composer.in_flight.store(false, Ordering::Release);
    }
}

impl Composer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            draft: Mutex::new(NotificationDraft::default()),
            in_flight: AtomicBool::new(false),
            phase: PhaseCell(AtomicU8::new(0)),
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.dispatcher.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub async fn draft(&self) -> NotificationDraft {
        self.draft.lock().await.clone()
    }

    /// Apply one field update and return the resulting draft.
    pub async fn apply(&self, update: DraftUpdate) -> PanelResult<NotificationDraft> {
        let mut draft = self.draft.lock().await;
        // Checked under the draft lock: a submit that starts later sees this update
        if self.in_flight.load(Ordering::Acquire) {
            debug!(?update, "Draft update refused while dispatching");
            return Err(PanelError::Busy);
        }
        debug!(?update, "Draft update");
        *draft = std::mem::take(&mut *draft).with(update);
        Ok(draft.clone())
    }

    /// Validate the draft and record it.
    ///
    /// An incomplete draft never reaches the store. On success the draft is
    /// reset and the parent is told; on a store failure the draft is kept so
    /// nothing the user typed is lost.
    pub async fn submit(&self) -> PanelResult<Uuid> {
        let _in_flight = self.begin()?;

        self.phase.enter(Phase::Validating);
        let payload = self.draft.lock().await.to_payload().inspect_err(|e| {
            debug!("Submission blocked: {}", e);
        })?;

        self.phase.enter(Phase::Persisting);
        match self.dispatcher.persist(payload).await {
            Ok(id) => {
                *self.draft.lock().await = NotificationDraft::default();
                info!(%id, "Custom notification recorded");
                self.dispatcher.broadcast(PanelEvent::NotificationAdded { id });
                self.dispatcher
                    .broadcast(PanelEvent::Acknowledged(Acknowledgement::Added));
                Ok(id)
            }
            Err(e) => {
                self.dispatcher
                    .broadcast(PanelEvent::Acknowledged(Acknowledgement::Failed {
                        reason: e.to_string(),
                    }));
                Err(e)
            }
        }
    }

    /// Push the fixed template for a category keyword. Leaves the draft alone.
    pub async fn quick_push(&self, keyword: &str) -> PanelResult<Uuid> {
        let _in_flight = self.begin()?;
        self.dispatcher.quick_push(keyword, &self.phase).await
    }

    /// The user is leaving the panel.
    pub fn close(&self) {
        info!("Panel closed");
        self.dispatcher.broadcast(PanelEvent::Closed);
    }

    fn begin(&self) -> PanelResult<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PanelError::Busy)?;
        Ok(InFlight { composer: self })
    }
}
