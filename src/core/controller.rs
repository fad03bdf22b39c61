//! Stock data controller - owns the aggregated snapshot and its refresh contract.
//!
//! The controller holds the latest aggregated list together with a loading
//! flag and an error slot, and refetches on demand, on scope change, or on an
//! external update signal. Overlapping refetches are sequenced: every dispatch
//! takes a monotonically increasing token, and a resolution is discarded
//! unless its token is still the latest issued, so a slow stale response can
//! never overwrite a newer one. On failure the last-known-good data is kept
//! and only the error slot changes, which avoids blanking views that were
//! already showing data.

use crate::{
    core::aggregate::AggregatedProductStock, core::fetch::fetch_aggregated_stock, errors::Result,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, watch};
use tracing::{debug, warn};

/// Read-only view of the controller state handed to consumers.
#[derive(Debug, Clone, Default)]
pub struct StockSnapshot {
    /// Latest aggregated list; empty until the first load completes
    pub data: Vec<AggregatedProductStock>,
    /// True while a fetch is in flight
    pub loading: bool,
    /// Human-readable message of the last failure, None when healthy
    pub error: Option<String>,
}

/// Stateful wrapper around the fetch-and-aggregate pipeline.
pub struct StockController {
    db: DatabaseConnection,
    scope: RwLock<Option<String>>,
    state: RwLock<StockSnapshot>,
    latest_request: AtomicU64,
}

impl StockController {
    /// Creates a controller in its initial loading state.
    ///
    /// No fetch happens here; call [`StockController::refetch`] (or hand the
    /// controller to [`StockController::run`]) to load data.
    #[must_use]
    pub fn new(db: DatabaseConnection, scope: Option<String>) -> Self {
        Self {
            db,
            scope: RwLock::new(scope),
            state: RwLock::new(StockSnapshot {
                data: Vec::new(),
                loading: true,
                error: None,
            }),
            latest_request: AtomicU64::new(0),
        }
    }

    /// Returns a clone of the current state.
    pub async fn snapshot(&self) -> StockSnapshot {
        self.state.read().await.clone()
    }

    /// Runs one fetch-and-aggregate round and commits the outcome, unless a
    /// newer round was dispatched in the meantime.
    pub async fn refetch(&self) {
        let token = self.begin_request().await;
        let scope = self.scope.read().await.clone();
        let result = fetch_aggregated_stock(&self.db, scope.as_deref()).await;
        self.resolve_request(token, result).await;
    }

    /// Replaces the owner scope and refetches under the new one.
    pub async fn set_scope(&self, scope: Option<String>) {
        *self.scope.write().await = scope;
        self.refetch().await;
    }

    /// Refetches on every change of the update signal until the sender side
    /// is dropped. Intended to be spawned as a task with a receiver obtained
    /// from [`crate::core::sync::SyncSignal::subscribe`].
    pub async fn run(self: Arc<Self>, mut updates: watch::Receiver<u64>) {
        while updates.changed().await.is_ok() {
            self.refetch().await;
        }
        debug!("Update signal closed, stopping stock refresh loop");
    }

    /// Marks a new in-flight request and returns its token.
    async fn begin_request(&self) -> u64 {
        let token = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.loading = true;
        token
    }

    /// Commits a finished request, discarding it when it is no longer the
    /// latest dispatched one.
    async fn resolve_request(&self, token: u64, result: Result<Vec<AggregatedProductStock>>) {
        let mut state = self.state.write().await;
        if token != self.latest_request.load(Ordering::SeqCst) {
            debug!("Discarding stale stock response (token {token})");
            return;
        }

        state.loading = false;
        match result {
            Ok(data) => {
                state.data = data;
                state.error = None;
            }
            Err(e) => {
                // Keep the last-known-good data; only the error slot changes
                warn!("Stock refresh failed: {e}");
                state.error = Some(e.to_string());
            }
        }
    }
}
