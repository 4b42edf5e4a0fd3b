//! # Navigation Handlers

use crate::app::events::AppEvent;
use crate::app::state::{AppState, Screen};
use crate::app::tasks;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

/// Switch screens. Authenticated screens bounce to login without a
/// session; leaving the chat screen stops the poll loop.
pub(crate) fn handle_navigate(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    screen: Screen,
) {
    {
        let mut guard = state.write();
        if AppState::requires_auth(screen) && !guard.is_authenticated() {
            guard.current_screen = Screen::Login;
            return;
        }
        if guard.current_screen == Screen::Chat && screen != Screen::Chat {
            guard.chat.poll_generation += 1;
            guard.chat.active_room_id = None;
        }
        guard.current_screen = screen;
    }

    // Screens that load on entry
    match screen {
        Screen::Dashboard => {
            tasks::dashboard::fetch_dashboard(state, event_tx, false);
        }
        Screen::Chat => {
            super::chat::handle_load_rooms(state, event_tx);
        }
        _ => {}
    }
}

/// Foreground/visibility regained: force-refresh the dashboard past the
/// cache and run a notification poll.
pub(crate) fn handle_visibility_regained(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
) {
    if !state.read().is_authenticated() {
        return;
    }
    let poll_state = Arc::clone(&state);
    let poll_tx = event_tx.clone();
    tokio::spawn(async move {
        tasks::notifications::poll_once(&poll_state, &poll_tx).await;
    });
    tasks::dashboard::fetch_dashboard(state, event_tx, true);
}
