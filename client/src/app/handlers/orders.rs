//! # Order Handlers
//!
//! The creation wizard (create → add items → set reward → finalize) and
//! the lifecycle transitions (accept, confirm delivery, cancel).

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::core::service::ImagePart;
use crate::utils::validation;
use async_channel::Sender;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::dto::orders::{AddItemRequest, CreateOrderRequest};
use std::sync::Arc;

/// Create the draft order from the wizard's route step
pub(crate) fn handle_create_order(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (api, request) = {
        let mut guard = state.write();
        if guard.draft.submitting {
            return;
        }
        if guard.draft.origin_city.is_empty() || guard.draft.destination_city.is_empty() {
            guard.draft.error = Some("Origin and destination required".to_string());
            return;
        }
        let Some(api) = guard.api.clone() else {
            guard.draft.error = Some("Backend not available".to_string());
            return;
        };
        guard.draft.submitting = true;
        guard.draft.error = None;
        (
            api,
            CreateOrderRequest {
                origin_city: guard.draft.origin_city.clone(),
                destination_city: guard.draft.destination_city.clone(),
                picker_id: guard.draft.picker_id,
            },
        )
    };

    tokio::spawn(async move {
        let result = api.create_order(request).await;
        let _ = event_tx.send(AppEvent::OrderCreated(result)).await;
    });
}

/// Add an item (with optional images) to the draft
pub(crate) fn handle_add_item(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    name: String,
    price: String,
    quantity: u32,
    images: Vec<ImagePart>,
) {
    let price = match validation::validate_amount(&price) {
        Ok(price) => price,
        Err(message) => {
            state.write().draft.error = Some(message);
            return;
        }
    };
    if name.is_empty() {
        state.write().draft.error = Some("Item name required".to_string());
        return;
    }
    if quantity == 0 {
        state.write().draft.error = Some("Quantity must be at least 1".to_string());
        return;
    }

    let (api, order_id) = {
        let guard = state.read();
        match (guard.api.clone(), guard.draft.order_id) {
            (Some(api), Some(order_id)) => (api, order_id),
            _ => return,
        }
    };

    tokio::spawn(async move {
        let result = api
            .add_order_item(
                order_id,
                AddItemRequest {
                    name,
                    price,
                    quantity,
                },
                images,
            )
            .await;
        let _ = event_tx.send(AppEvent::OrderMutated(result)).await;
    });
}

/// Set the reward on the draft
pub(crate) fn handle_set_reward(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    reward: String,
) {
    let reward = match validation::validate_amount(&reward) {
        Ok(reward) => reward,
        Err(message) => {
            state.write().draft.error = Some(message);
            return;
        }
    };

    let (api, order_id) = {
        let mut guard = state.write();
        match (guard.api.clone(), guard.draft.order_id) {
            (Some(api), Some(order_id)) => {
                guard.draft.reward = Some(reward);
                (api, order_id)
            }
            _ => return,
        }
    };

    tokio::spawn(async move {
        let result = api.set_reward(order_id, reward).await;
        let _ = event_tx.send(AppEvent::OrderMutated(result)).await;
    });
}

/// Finalize the draft: Draft → Pending, making it visible to pickers
pub(crate) fn handle_finalize_order(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (api, order_id) = {
        let mut guard = state.write();
        if guard.draft.items.is_empty() {
            guard.draft.error = Some("Add at least one item first".to_string());
            return;
        }
        if guard.draft.reward.unwrap_or(Decimal::ZERO) <= Decimal::ZERO {
            guard.draft.error = Some("Set a reward first".to_string());
            return;
        }
        match (guard.api.clone(), guard.draft.order_id) {
            (Some(api), Some(order_id)) => (api, order_id),
            _ => return,
        }
    };

    tokio::spawn(async move {
        let result = api.finalize_order(order_id).await;
        let _ = event_tx.send(AppEvent::OrderMutated(result)).await;
    });
}

/// Load the user's orders
pub(crate) fn handle_load_orders(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    page: u32,
) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.list_orders(page).await;
        let _ = event_tx.send(AppEvent::OrdersLoaded(result)).await;
    });
}

/// Open one order: fetch the full record plus its offer history
pub(crate) fn handle_open_order(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    order_id: i64,
) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    let offers_api = Arc::clone(&api);
    let offers_tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.get_order(order_id).await;
        let _ = event_tx.send(AppEvent::OrderLoaded(result)).await;
    });
    tokio::spawn(async move {
        let result = offers_api.get_offers(order_id, 1).await;
        let _ = offers_tx
            .send(AppEvent::OffersLoaded { order_id, result })
            .await;
    });
}

/// Picker accepts a pending order
pub(crate) fn handle_accept_order(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    order_id: i64,
) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.accept_order(order_id).await;
        let _ = event_tx.send(AppEvent::OrderMutated(result)).await;
    });
}

/// Picker confirms the delivery happened
pub(crate) fn handle_confirm_delivery(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    order_id: i64,
) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.confirm_delivery(order_id).await;
        let _ = event_tx.send(AppEvent::OrderMutated(result)).await;
    });
}

/// Orderer cancels an order
pub(crate) fn handle_cancel_order(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    order_id: i64,
) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.cancel_order(order_id).await.map(|_| order_id);
        let _ = event_tx.send(AppEvent::OrderCancelled(result)).await;
    });
}
