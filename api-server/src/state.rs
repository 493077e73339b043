//! Application state

use std::sync::{Arc, OnceLock};

use tg_core::{Provisioned, TaskGateway};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    gateway: TaskGateway,
    /// Set once provisioning has run; unset means not ready
    provisioned: OnceLock<Provisioned>,
}

impl AppState {
    pub fn new(gateway: TaskGateway) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                gateway,
                provisioned: OnceLock::new(),
            }),
        }
    }

    pub fn gateway(&self) -> &TaskGateway {
        &self.inner.gateway
    }

    /// Provisioning result, or `None` while startup is still running
    pub fn provisioned(&self) -> Option<&Provisioned> {
        self.inner.provisioned.get()
    }

    pub fn is_ready(&self) -> bool {
        self.provisioned().is_some()
    }

    /// Record the provisioning result. Only the first call has any effect.
    pub fn mark_ready(&self, provisioned: Provisioned) -> bool {
        self.inner.provisioned.set(provisioned).is_ok()
    }
}
