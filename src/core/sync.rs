//! Update signal and persisted sync markers.
//!
//! Other parts of the back office (imports, order intake, manual edits) change
//! catalog and stock data; consumers holding aggregated views need a cue to
//! refetch. [`SyncSignal`] is that cue: a watch channel whose receivers are
//! injected wherever a refresh loop runs, so tests can fake the collaborator
//! with a channel of their own. The last update instant is also persisted in
//! the `sync_state` table for observability across restarts.

use crate::{
    entities::{SyncState, sync_state},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{Set, prelude::*};
use tokio::sync::watch;

const CATALOG_LAST_UPDATE_KEY: &str = "catalog_last_update";

/// Broadcast handle for "data changed" cues.
///
/// Cloning is not needed: the owner keeps the signal and hands out receivers.
/// Dropping the signal closes the channel, which stops subscribed refresh
/// loops.
#[derive(Debug)]
pub struct SyncSignal {
    tx: watch::Sender<u64>,
}

impl SyncSignal {
    /// Creates a new signal with no changes recorded yet.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Returns a receiver that observes every subsequent change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    /// Announces that catalog or stock data changed.
    pub fn notify_change(&self) {
        self.tx.send_modify(|version| *version += 1);
    }
}

impl Default for SyncSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Records the current instant as the last catalog update in `sync_state`.
///
/// # Errors
/// Returns an error if the lookup or write fails.
pub async fn record_catalog_update(db: &DatabaseConnection) -> Result<DateTime<Utc>> {
    let now = Utc::now();
    let now_naive = now.naive_utc();

    let existing = SyncState::find()
        .filter(sync_state::Column::Key.eq(CATALOG_LAST_UPDATE_KEY))
        .one(db)
        .await?;

    if let Some(state) = existing {
        let mut active: sync_state::ActiveModel = state.into();
        active.value = Set(now.to_rfc3339());
        active.updated_at = Set(now_naive);
        active.update(db).await?;
    } else {
        let state = sync_state::ActiveModel {
            key: Set(CATALOG_LAST_UPDATE_KEY.to_string()),
            value: Set(now.to_rfc3339()),
            updated_at: Set(now_naive),
            ..Default::default()
        };
        state.insert(db).await?;
    }

    Ok(now)
}

/// Retrieves the last recorded catalog update instant, if any.
///
/// # Errors
/// Returns an error if the lookup fails or a stored value does not parse.
pub async fn get_last_catalog_update(db: &DatabaseConnection) -> Result<Option<DateTime<Utc>>> {
    let state = SyncState::find()
        .filter(sync_state::Column::Key.eq(CATALOG_LAST_UPDATE_KEY))
        .one(db)
        .await?;

    match state {
        Some(s) => DateTime::parse_from_rfc3339(&s.value)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| Error::Config {
                message: format!("Failed to parse last catalog update: {e}"),
            }),
        None => Ok(None),
    }
}
