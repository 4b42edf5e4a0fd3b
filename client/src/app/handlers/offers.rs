//! # Offer Handlers
//!
//! Reward negotiation. The backend keeps at most one unresolved counter
//! offer per order; [`active_counter_offer`] finds it (or degrades to
//! "no active negotiation" when none exists).

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::utils::validation;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::dto::offers::{CounterOfferRequest, Offer};
use std::sync::Arc;

/// The order's active negotiation: the first pending counter offer in
/// server order, or `None` when every record is resolved.
pub(crate) fn active_counter_offer(offers: &[Offer]) -> Option<&Offer> {
    offers.iter().find(|offer| offer.is_pending_counter())
}

/// Picker proposes an alternative reward
pub(crate) fn handle_submit_counter_offer(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    order_id: i64,
    amount: String,
) {
    let amount = match validation::validate_amount(&amount) {
        Ok(amount) => amount,
        Err(message) => {
            state.write().last_error = Some(message);
            return;
        }
    };
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api
            .submit_counter_offer(CounterOfferRequest { order_id, amount })
            .await;
        let _ = event_tx.send(AppEvent::OfferResolved(result)).await;
    });
}

/// Orderer accepts the picker's counter offer
pub(crate) fn handle_accept_offer(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    offer_id: i64,
) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.accept_offer(offer_id).await;
        let _ = event_tx.send(AppEvent::OfferResolved(result)).await;
    });
}

/// Orderer rejects the picker's counter offer
pub(crate) fn handle_reject_offer(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    offer_id: i64,
) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.reject_offer(offer_id).await;
        let _ = event_tx.send(AppEvent::OfferResolved(result)).await;
    });
}
