//! # Profile Handlers

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::tasks;
use crate::core::service::ImagePart;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::dto::auth::UpdateProfileRequest;
use std::sync::Arc;

/// Reload the profile from the backend
pub(crate) fn handle_load_profile(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.get_profile().await;
        let _ = event_tx.send(AppEvent::ProfileLoaded(result)).await;
    });
}

/// Save profile fields, then start the post-save poll loop to pick up
/// any server-side processing.
pub(crate) fn handle_save_profile(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    request: UpdateProfileRequest,
) {
    let api = {
        let mut guard = state.write();
        if guard.profile.saving {
            return;
        }
        let Some(api) = guard.api.clone() else {
            return;
        };
        guard.profile.saving = true;
        guard.profile.error = None;
        api
    };

    let poll_state = Arc::clone(&state);
    let poll_tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.update_profile(request).await;
        let saved = result.is_ok();
        let _ = event_tx.send(AppEvent::ProfileSaved(result)).await;
        if saved {
            tasks::profile::poll_after_save(poll_state, poll_tx);
        }
    });
}

/// Upload a new avatar image, then poll for the processed result
pub(crate) fn handle_upload_avatar(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    avatar: ImagePart,
) {
    let api = {
        let mut guard = state.write();
        if guard.profile.saving {
            return;
        }
        let Some(api) = guard.api.clone() else {
            return;
        };
        guard.profile.saving = true;
        api
    };

    let poll_state = Arc::clone(&state);
    let poll_tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.upload_avatar(avatar).await;
        let saved = result.is_ok();
        let _ = event_tx.send(AppEvent::ProfileSaved(result)).await;
        if saved {
            tasks::profile::poll_after_save(poll_state, poll_tx);
        }
    });
}
