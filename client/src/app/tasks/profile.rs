//! # Profile Tasks
//!
//! After a profile save the server may still be processing the avatar, so
//! the saved state is polled every 3 seconds for up to 15 seconds.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::spawn;

pub(crate) const PROFILE_POLL_INTERVAL: Duration = Duration::from_secs(3);
pub(crate) const PROFILE_POLL_ATTEMPTS: u32 = 5;

/// Poll the profile after a save for a fixed number of attempts,
/// surfacing each successful read so state tracks server-side processing.
/// At most one loop runs at a time.
pub(crate) fn poll_after_save(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let api = {
        let mut state = state.write();
        if state.profile.polling_after_save {
            return;
        }
        let Some(api) = state.api.clone() else {
            return;
        };
        state.profile.polling_after_save = true;
        api
    };

    let state_arc = Arc::clone(&state);
    spawn(async move {
        let mut latest = None;
        for attempt in 1..=PROFILE_POLL_ATTEMPTS {
            tokio::time::sleep(PROFILE_POLL_INTERVAL).await;
            match api.get_profile().await {
                Ok(profile) => {
                    latest = Some(profile.clone());
                    let _ = event_tx.send(AppEvent::ProfileLoaded(Ok(profile))).await;
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "post-save profile poll failed");
                }
            }
        }

        {
            state_arc.write().profile.polling_after_save = false;
        }
        let _ = event_tx.send(AppEvent::ProfileSettled(latest)).await;
    });
}
