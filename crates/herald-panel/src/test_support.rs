//! In-memory fakes for the store and notifier seams.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio::sync::Semaphore;
use uuid::Uuid;

use herald_types::NotificationPayload;

use crate::notifier::{NativeNotifier, Permission};
use crate::store::NotificationStore;

pub struct FakeStore {
    appended: Mutex<Vec<NotificationPayload>>,
    fail: bool,
    gate: Option<Semaphore>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            appended: Mutex::new(Vec::new()),
            fail: false,
            gate: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Appends wait until [`FakeStore::release`] is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn appended(&self) -> Vec<NotificationPayload> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationStore for FakeStore {
    async fn append(&self, payload: NotificationPayload) -> Result<Uuid> {
        if let Some(gate) = &self.gate {
            gate.acquire().await?.forget();
        }
        if self.fail {
            return Err(anyhow!("disk full"));
        }
        self.appended.lock().unwrap().push(payload);
        Ok(Uuid::new_v4())
    }
}

pub struct FakeNotifier {
    permission: Mutex<Permission>,
    answer: Permission,
    requests: AtomicUsize,
    displayed: Mutex<Vec<(String, String)>>,
}

impl FakeNotifier {
    pub fn new(permission: Permission, answer: Permission) -> Self {
        Self {
            permission: Mutex::new(permission),
            answer,
            requests: AtomicUsize::new(0),
            displayed: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Titles shown so far.
    pub fn displayed(&self) -> Vec<String> {
        self.displayed.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn icons(&self) -> Vec<String> {
        self.displayed.lock().unwrap().iter().map(|(_, i)| i.clone()).collect()
    }
}

#[async_trait]
impl NativeNotifier for FakeNotifier {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> Permission {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.permission.lock().unwrap() = self.answer;
        self.answer
    }

    fn display(&self, title: &str, _body: &str, icon: &str) {
        self.displayed.lock().unwrap().push((title.to_string(), icon.to_string()));
    }
}
