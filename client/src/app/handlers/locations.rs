//! # Location Handlers
//!
//! Country/city reference data, cached in memory for the session.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::dto::locations::CreateCityRequest;
use std::sync::Arc;

pub(crate) fn handle_load_countries(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    {
        let guard = state.read();
        if !guard.countries.is_empty() {
            return;
        }
    }
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.get_countries().await;
        let _ = event_tx.send(AppEvent::CountriesLoaded(result)).await;
    });
}

/// Load the cities of a country, skipping the call when already cached
pub(crate) fn handle_load_cities(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    country_id: i64,
) {
    {
        let guard = state.read();
        if guard.cities_by_country.contains_key(&country_id) {
            return;
        }
    }
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        let result = api.get_cities(country_id).await;
        let _ = event_tx
            .send(AppEvent::CitiesLoaded { country_id, result })
            .await;
    });
}

/// Add a city missing from the reference data
pub(crate) fn handle_create_city(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    country_id: i64,
    name: String,
) {
    if name.trim().is_empty() {
        state.write().last_error = Some("City name required".to_string());
        return;
    }
    let Some(api) = state.read().api.clone() else {
        return;
    };
    tokio::spawn(async move {
        // Creation invalidates the slot: re-fetch the full list so the
        // cache reflects server-side ordering
        let result = match api.create_city(CreateCityRequest { country_id, name }).await {
            Ok(_) => api.get_cities(country_id).await,
            Err(e) => Err(e),
        };
        let _ = event_tx
            .send(AppEvent::CitiesLoaded { country_id, result })
            .await;
    });
}
