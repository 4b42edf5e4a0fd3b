//! # Chat Polling Tasks
//!
//! Room selection starts a 2-second poll loop for that room. The loop is
//! guarded by a generation counter in chat state so re-selecting a room
//! (or switching rooms) never stacks timers: each loop remembers the
//! generation it was started under and exits once it goes stale.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::dto::chat::ChatMessage;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::spawn;

pub(crate) const CHAT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
pub(crate) const CHAT_PAGE_SIZE: u32 = 50;

/// Select (or deselect, with `None`) the active chat room.
///
/// On selection: one immediate fetch that replaces the local list, then a
/// poll loop that merges. On deselection: only the generation bump, which
/// makes any running loop exit at its next tick.
pub(crate) fn select_room(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    room_id: Option<i64>,
) {
    let (generation, api) = {
        let mut state = state.write();
        state.chat.poll_generation += 1;
        state.chat.active_room_id = room_id;
        (state.chat.poll_generation, state.api.clone())
    };

    let (Some(room_id), Some(api)) = (room_id, api) else {
        return;
    };

    let state_arc = Arc::clone(&state);
    spawn(async move {
        // Selection fetch: page 1, replaces whatever is cached locally
        let result = api.get_messages(room_id, 1, CHAT_PAGE_SIZE).await;
        let _ = event_tx
            .send(AppEvent::MessagesFetched {
                room_id,
                replace: true,
                result,
            })
            .await;

        loop {
            tokio::time::sleep(CHAT_POLL_INTERVAL).await;

            {
                let state = state_arc.read();
                if state.chat.poll_generation != generation {
                    tracing::debug!(room_id, "chat poll loop superseded, exiting");
                    break;
                }
            }

            match api.get_messages(room_id, 1, CHAT_PAGE_SIZE).await {
                Ok(page) => {
                    let _ = event_tx
                        .send(AppEvent::MessagesFetched {
                            room_id,
                            replace: false,
                            result: Ok(page),
                        })
                        .await;
                }
                Err(e) => {
                    // Dropped on the floor; the next tick retries
                    tracing::warn!(room_id, error = %e, "chat poll iteration failed");
                }
            }
        }
    });
}

/// Append-only merge: incoming messages whose id is new are appended in
/// server order; known messages are never replaced, removed, or reordered.
pub(crate) fn merge_messages(existing: &mut Vec<ChatMessage>, incoming: Vec<ChatMessage>) {
    let mut known: HashSet<i64> = existing.iter().map(|m| m.id).collect();
    for message in incoming {
        if known.insert(message.id) {
            existing.push(message);
        }
    }
}
