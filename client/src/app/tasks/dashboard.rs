//! # Dashboard Tasks
//!
//! Cache-aware fetch of the role-specific aggregate feed, plus the
//! 30-second background loop that refreshes it and drives the
//! notification poll.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, DashboardPayload};
use crate::app::tasks::notifications;
use crate::core::service::ApiService;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::dto::auth::Role;
use std::sync::Arc;
use std::time::Duration;
use tokio::spawn;

pub(crate) const DASHBOARD_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// One cache-aware fetch. Returns `true` if the network was hit, `false`
/// when the cache was still valid, a fetch was already in flight, or no
/// session exists. `skip_cache` forces the fetch regardless of validity.
pub(crate) async fn fetch_once(
    state: &Arc<RwLock<AppState>>,
    event_tx: &Sender<AppEvent>,
    skip_cache: bool,
) -> bool {
    let (api, picker): (Arc<dyn ApiService>, bool) = {
        let mut state = state.write();
        if !skip_cache && state.dashboard.cache.fresh().is_some() {
            return false;
        }
        if state.dashboard.fetching {
            return false;
        }
        let Some(api) = state.api.clone() else {
            return false;
        };
        if state.current_user.is_none() {
            return false;
        }
        state.dashboard.fetching = true;
        (api, state.has_role(Role::Picker))
    };

    let result = if picker {
        api.get_picker_dashboard().await.map(DashboardPayload::Picker)
    } else {
        api.get_orderer_dashboard().await.map(DashboardPayload::Orderer)
    };

    {
        state.write().dashboard.fetching = false;
    }

    let _ = event_tx.send(AppEvent::DashboardLoaded(result)).await;
    true
}

/// Spawn a single fetch
pub(crate) fn fetch_dashboard(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    skip_cache: bool,
) {
    spawn(async move {
        fetch_once(&state, &event_tx, skip_cache).await;
    });
}

/// Background loop: every 30 seconds, poll notifications and refresh the
/// dashboard. Runs for the lifetime of the app; ticks without a session
/// are no-ops.
pub(crate) fn start_background_polling(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    spawn(async move {
        loop {
            tokio::time::sleep(DASHBOARD_POLL_INTERVAL).await;
            if state.read().current_user.is_none() {
                continue;
            }
            notifications::poll_once(&state, &event_tx).await;
            fetch_once(&state, &event_tx, true).await;
        }
    });
}
