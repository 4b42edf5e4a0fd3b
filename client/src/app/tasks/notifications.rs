//! # Notification Polling Tasks

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::spawn;

/// How long a transient prompt stays up before auto-dismissing.
/// Dismissal clears the prompt only; the history item stays unread.
pub(crate) const PROMPT_DISMISS_DELAY: Duration = Duration::from_secs(5);

/// One notification poll iteration. Failures are logged and dropped.
/// Returns whether the poll actually went out.
pub(crate) async fn poll_once(state: &Arc<RwLock<AppState>>, event_tx: &Sender<AppEvent>) -> bool {
    // Check-and-set under a single write lock: the 30s loop and a
    // visibility-regained refresh can land at the same time, and only
    // one of them may proceed
    let api = {
        let mut state = state.write();
        if state.current_user.is_none() || state.notifications.polling {
            return false;
        }
        let Some(api) = state.api.clone() else {
            return false;
        };
        state.notifications.polling = true;
        api
    };

    match api.get_notifications().await {
        Ok(notifications) => {
            let _ = event_tx
                .send(AppEvent::NotificationsPolled(notifications))
                .await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "notification poll failed");
        }
    }

    match api.get_unread_count().await {
        Ok(count) => {
            let _ = event_tx.send(AppEvent::UnreadCount(count)).await;
        }
        Err(e) => {
            tracing::debug!(error = %e, "unread count fetch failed");
        }
    }

    state.write().notifications.polling = false;
    true
}

/// Schedule the transient prompt for a notification to auto-dismiss.
/// Only clears the prompt if it still shows the same notification.
pub(crate) fn dismiss_prompt_later(state: Arc<RwLock<AppState>>, notification_id: i64) {
    spawn(async move {
        tokio::time::sleep(PROMPT_DISMISS_DELAY).await;
        let mut state = state.write();
        if state
            .notifications
            .prompt
            .as_ref()
            .map(|n| n.id == notification_id)
            .unwrap_or(false)
        {
            state.notifications.prompt = None;
        }
    });
}
