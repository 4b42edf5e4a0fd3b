//! # Search Handlers

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::utils::time;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::dto::journeys::CreateJourneyRequest;
use shared::dto::search::OrderSearchQuery;
use std::sync::Arc;

pub(crate) fn handle_search_orders(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    query: OrderSearchQuery,
) {
    let api = {
        let mut guard = state.write();
        if guard.search.searching {
            return;
        }
        let Some(api) = guard.api.clone() else {
            return;
        };
        guard.search.searching = true;
        api
    };
    tokio::spawn(async move {
        let result = api.search_orders(query).await;
        let _ = event_tx.send(AppEvent::SearchResults(result)).await;
    });
}

pub(crate) fn handle_search_pickers(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    query: String,
) {
    if query.trim().is_empty() {
        return;
    }
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.search_pickers(&query).await;
        let _ = event_tx.send(AppEvent::PickerSearchResults(result)).await;
    });
}

/// Load the picker's journeys
pub(crate) fn handle_load_journeys(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.list_journeys().await;
        let _ = event_tx.send(AppEvent::JourneysLoaded(result)).await;
    });
}

/// Register a planned trip
pub(crate) fn handle_create_journey(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    request: CreateJourneyRequest,
) {
    if request.origin_city.is_empty() || request.destination_city.is_empty() {
        state.write().last_error = Some("Origin and destination required".to_string());
        return;
    }
    if !time::is_before(&request.departure_date, &request.arrival_date) {
        state.write().last_error = Some("Arrival must be after departure".to_string());
        return;
    }
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.create_journey(request).await;
        let _ = event_tx.send(AppEvent::JourneyCreated(result)).await;
    });
}
