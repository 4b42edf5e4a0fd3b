//! # Chat Handlers

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::tasks;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::dto::chat::{GetOrCreateRoomRequest, SendMessageRequest};
use std::sync::Arc;

/// Load the user's chat rooms
pub(crate) fn handle_load_rooms(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.list_rooms().await;
        let _ = event_tx.send(AppEvent::RoomsLoaded(result)).await;
    });
}

/// Open (or lazily create) the room for an order/picker pair, then
/// select it so polling starts once the room id is known.
pub(crate) fn handle_open_room(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    order_id: i64,
    picker_id: i64,
) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api
            .get_or_create_room(GetOrCreateRoomRequest {
                order_id,
                picker_id,
            })
            .await;
        let _ = event_tx.send(AppEvent::RoomOpened(result)).await;
    });
}

/// Select a room (starting its poll loop) or deselect with `None`
pub(crate) fn handle_select_room(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    room_id: Option<i64>,
) {
    tasks::chat::select_room(state, event_tx, room_id);
}

/// Send the composed message to the active room
pub(crate) fn handle_send_message(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (api, room_id, content) = {
        let mut guard = state.write();
        let content = guard.chat.message_input.trim().to_string();
        if content.is_empty() || guard.chat.sending {
            return;
        }
        let (Some(api), Some(room_id)) = (guard.api.clone(), guard.chat.active_room_id) else {
            return;
        };
        guard.chat.sending = true;
        (api, room_id, content)
    };

    tokio::spawn(async move {
        let result = api.send_message(room_id, SendMessageRequest { content }).await;
        let _ = event_tx
            .send(AppEvent::MessageSent { room_id, result })
            .await;
    });
}

/// Best-effort read receipt; errors are swallowed
pub(crate) fn handle_mark_message_read(state: Arc<RwLock<AppState>>, message_id: i64) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        if let Err(e) = api.mark_message_read(message_id).await {
            tracing::debug!(message_id, error = %e, "mark message read failed");
        }
    });
}
