//! # Event Handler
//!
//! Applies [`AppEvent`]s from background tasks to application state. The
//! write lock is taken per event and held briefly.

use crate::app::events::AppEvent;
use crate::app::state::{AuthForm, DashboardPayload, Screen};
use crate::app::tasks;
use crate::app::App;
use crate::core::error::ApiError;
use shared::dto::auth::{AuthResponse, UserProfile};
use shared::dto::chat::{ChatMessage, ChatRoom, MessagesPage};
use shared::dto::notifications::Notification;
use shared::dto::offers::{Offer, OffersPage};
use shared::dto::orders::{Order, OrderStatus, OrdersPage};
use std::sync::Arc;

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl AppEventHandler for App {
    fn handle_event_impl(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoginResult(result) => self.handle_auth_result(result, true),
            AppEvent::RegisterResult(result) => self.handle_auth_result(result, false),
            AppEvent::SessionExpired => self.handle_session_expired(),
            AppEvent::ProfileLoaded(result) => self.handle_profile_loaded(result),
            AppEvent::ProfileSaved(result) => self.handle_profile_saved(result),
            AppEvent::ProfileSettled(profile) => self.handle_profile_settled(profile),
            AppEvent::OrdersLoaded(result) => self.handle_orders_loaded(result),
            AppEvent::OrderLoaded(result) => self.handle_order_loaded(result),
            AppEvent::OrderCreated(result) => self.handle_order_created(result),
            AppEvent::OrderMutated(result) => self.handle_order_mutated(result),
            AppEvent::OrderCancelled(result) => self.handle_order_cancelled(result),
            AppEvent::OffersLoaded { order_id, result } => {
                self.handle_offers_loaded(order_id, result)
            }
            AppEvent::OfferResolved(result) => self.handle_offer_resolved(result),
            AppEvent::RoomsLoaded(result) => self.handle_rooms_loaded(result),
            AppEvent::RoomOpened(result) => self.handle_room_opened(result),
            AppEvent::MessagesFetched {
                room_id,
                replace,
                result,
            } => self.handle_messages_fetched(room_id, replace, result),
            AppEvent::MessageSent { room_id, result } => {
                self.handle_message_sent(room_id, result)
            }
            AppEvent::DashboardLoaded(result) => self.handle_dashboard_loaded(result),
            AppEvent::NotificationsPolled(notifications) => {
                self.handle_notifications_polled(notifications)
            }
            AppEvent::UnreadCount(count) => {
                self.state.write().notifications.server_unread = count;
            }
            AppEvent::JourneysLoaded(result) => self.handle_journeys_loaded(result),
            AppEvent::JourneyCreated(result) => self.handle_journey_created(result),
            AppEvent::CountriesLoaded(result) => self.handle_countries_loaded(result),
            AppEvent::CitiesLoaded { country_id, result } => {
                self.handle_cities_loaded(country_id, result)
            }
            AppEvent::SearchResults(result) => self.handle_search_results(result),
            AppEvent::PickerSearchResults(result) => self.handle_picker_search_results(result),
        }
    }
}

impl App {
    fn handle_auth_result(&mut self, result: Result<AuthResponse, ApiError>, login: bool) {
        match result {
            Ok(auth) => {
                tracing::info!(user_id = auth.user.id, login, "authenticated");
                self.session.store(&auth);
                let mut state = self.state.write();
                state.current_user = Some(auth.user);
                state.auth = AuthForm::empty_login();
                state.current_screen = Screen::Dashboard;
                state.last_error = None;
                drop(state);
                tasks::dashboard::fetch_dashboard(
                    Arc::clone(&self.state),
                    self.event_tx.clone(),
                    false,
                );
            }
            Err(e) => {
                self.state.write().auth.set_error(e.to_string());
            }
        }
    }

    fn handle_session_expired(&mut self) {
        tracing::warn!("session expired, returning to login");
        let mut state = self.state.write();
        state.current_user = None;
        state.auth = AuthForm::empty_login();
        state
            .auth
            .set_error("Session expired, please log in again");
        state.current_screen = Screen::Login;
        // Stop any chat poll loop
        state.chat.poll_generation += 1;
        state.chat.active_room_id = None;
    }

    fn handle_profile_loaded(&mut self, result: Result<UserProfile, ApiError>) {
        match result {
            Ok(profile) => {
                self.session.update_user(&profile);
                self.state.write().current_user = Some(profile);
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile load failed");
            }
        }
    }

    fn handle_profile_saved(&mut self, result: Result<UserProfile, ApiError>) {
        let mut state = self.state.write();
        state.profile.saving = false;
        match result {
            Ok(profile) => {
                self.session.update_user(&profile);
                state.current_user = Some(profile);
                state.profile.error = None;
            }
            Err(e) => {
                state.profile.error = Some(e.to_string());
            }
        }
    }

    fn handle_profile_settled(&mut self, profile: Option<UserProfile>) {
        if let Some(profile) = profile {
            self.session.update_user(&profile);
            self.state.write().current_user = Some(profile);
        }
    }

    fn handle_orders_loaded(&mut self, result: Result<OrdersPage, ApiError>) {
        let mut state = self.state.write();
        match result {
            Ok(page) => {
                state.orders = page.orders;
                state.last_error = None;
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
            }
        }
    }

    fn handle_order_loaded(&mut self, result: Result<Order, ApiError>) {
        let mut state = self.state.write();
        match result {
            Ok(order) => {
                state.selected_order = Some(order);
                state.current_screen = Screen::OrderDetail;
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
            }
        }
    }

    fn handle_order_created(&mut self, result: Result<Order, ApiError>) {
        let mut state = self.state.write();
        state.draft.submitting = false;
        match result {
            Ok(order) => {
                tracing::info!(order_id = order.id, "draft order created");
                state.draft.order_id = Some(order.id);
                state.draft.error = None;
                state.orders.push(order);
            }
            Err(e) => {
                state.draft.error = Some(e.to_string());
            }
        }
    }

    /// Any lifecycle mutation result. The returned order is the
    /// authoritative copy; it replaces local copies and stales the
    /// dashboard cache.
    fn handle_order_mutated(&mut self, result: Result<Order, ApiError>) {
        let mut state = self.state.write();
        match result {
            Ok(order) => {
                if state.draft.order_id == Some(order.id) {
                    state.draft.items = order.items.clone();
                    state.draft.reward = Some(order.reward);
                    state.draft.error = None;
                    if order.status != OrderStatus::Draft {
                        // Finalized: the wizard is done
                        state.draft = Default::default();
                        state.current_screen = Screen::OrderDetail;
                    }
                }
                if state.selected_order.as_ref().map(|o| o.id) == Some(order.id) {
                    state.selected_order = Some(order.clone());
                }
                match state.orders.iter().position(|o| o.id == order.id) {
                    Some(idx) => state.orders[idx] = order.clone(),
                    None => state.orders.push(order.clone()),
                }
                if state.selected_order.is_none() && state.current_screen == Screen::OrderDetail {
                    state.selected_order = Some(order);
                }
                state.dashboard.cache.invalidate();
            }
            Err(e) => {
                let message = e.to_string();
                state.draft.error = Some(message.clone());
                state.last_error = Some(message);
            }
        }
    }

    fn handle_order_cancelled(&mut self, result: Result<i64, ApiError>) {
        let mut state = self.state.write();
        match result {
            Ok(order_id) => {
                if let Some(order) = state.orders.iter_mut().find(|o| o.id == order_id) {
                    order.status = OrderStatus::Cancelled;
                }
                if let Some(selected) = state.selected_order.as_mut() {
                    if selected.id == order_id {
                        selected.status = OrderStatus::Cancelled;
                    }
                }
                state.dashboard.cache.invalidate();
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
            }
        }
    }

    fn handle_offers_loaded(&mut self, order_id: i64, result: Result<OffersPage, ApiError>) {
        let mut state = self.state.write();
        // Late responses for a different order are dropped
        if state.selected_order.as_ref().map(|o| o.id) != Some(order_id) {
            return;
        }
        match result {
            Ok(page) => {
                state.selected_order_offers = page.offers;
            }
            Err(e) => {
                tracing::warn!(order_id, error = %e, "offer history load failed");
            }
        }
    }

    fn handle_offer_resolved(&mut self, result: Result<Offer, ApiError>) {
        let mut state = self.state.write();
        match result {
            Ok(offer) => {
                if state.selected_order.as_ref().map(|o| o.id) == Some(offer.order_id) {
                    match state
                        .selected_order_offers
                        .iter()
                        .position(|o| o.id == offer.id)
                    {
                        Some(idx) => state.selected_order_offers[idx] = offer,
                        None => state.selected_order_offers.push(offer),
                    }
                }
                state.dashboard.cache.invalidate();
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
            }
        }
    }

    fn handle_rooms_loaded(&mut self, result: Result<Vec<ChatRoom>, ApiError>) {
        let mut state = self.state.write();
        match result {
            Ok(mut rooms) => {
                // Most recently active first; rooms with no messages sink
                rooms.sort_by_cached_key(|room| {
                    std::cmp::Reverse(
                        room.last_message_at
                            .as_deref()
                            .and_then(crate::utils::time::parse_timestamp),
                    )
                });
                state.chat.rooms = rooms;
                state.chat.error = None;
            }
            Err(e) => {
                state.chat.error = Some(e.to_string());
            }
        }
    }

    /// Get-or-create resolved: the same (order, picker) pair always maps
    /// to the same room, so a known id is re-selected rather than added.
    fn handle_room_opened(&mut self, result: Result<ChatRoom, ApiError>) {
        let room = {
            let mut state = self.state.write();
            match result {
                Ok(room) => {
                    if !state.chat.rooms.iter().any(|r| r.id == room.id) {
                        state.chat.rooms.push(room.clone());
                    }
                    state.current_screen = Screen::Chat;
                    room
                }
                Err(e) => {
                    state.chat.error = Some(e.to_string());
                    return;
                }
            }
        };
        tasks::chat::select_room(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            Some(room.id),
        );
    }

    fn handle_messages_fetched(
        &mut self,
        room_id: i64,
        replace: bool,
        result: Result<MessagesPage, ApiError>,
    ) {
        let mut state = self.state.write();
        match result {
            Ok(page) => {
                if replace {
                    state.chat.messages.insert(room_id, page.messages);
                } else {
                    let existing = state.chat.messages.entry(room_id).or_default();
                    tasks::chat::merge_messages(existing, page.messages);
                }
                state.chat.error = None;
            }
            Err(e) => {
                if replace {
                    state.chat.error = Some(e.to_string());
                }
            }
        }
    }

    fn handle_message_sent(&mut self, room_id: i64, result: Result<ChatMessage, ApiError>) {
        let mut state = self.state.write();
        state.chat.sending = false;
        match result {
            Ok(message) => {
                let existing = state.chat.messages.entry(room_id).or_default();
                tasks::chat::merge_messages(existing, vec![message]);
                state.chat.message_input.clear();
                state.chat.error = None;
            }
            Err(e) => {
                state.chat.error = Some(e.to_string());
            }
        }
    }

    fn handle_dashboard_loaded(&mut self, result: Result<DashboardPayload, ApiError>) {
        let mut state = self.state.write();
        match result {
            Ok(payload) => {
                state.dashboard.cache.store(payload);
                state.dashboard.error = None;
            }
            Err(e) => {
                // Stale payload stays renderable; just record the failure
                tracing::warn!(error = %e, "dashboard fetch failed");
                state.dashboard.error = Some(e.to_string());
            }
        }
    }

    fn handle_notifications_polled(&mut self, notifications: Vec<Notification>) {
        let prompt_id = {
            let mut state = self.state.write();
            let fresh = state.notifications.absorb(notifications);
            match fresh.last() {
                Some(newest) => {
                    let id = newest.id;
                    state.notifications.prompt = Some(newest.clone());
                    Some(id)
                }
                None => None,
            }
        };
        if let Some(notification_id) = prompt_id {
            tasks::notifications::dismiss_prompt_later(Arc::clone(&self.state), notification_id);
        }
    }

    fn handle_journeys_loaded(
        &mut self,
        result: Result<Vec<shared::dto::journeys::TravelJourney>, ApiError>,
    ) {
        let mut state = self.state.write();
        match result {
            Ok(journeys) => state.journeys = journeys,
            Err(e) => state.last_error = Some(e.to_string()),
        }
    }

    fn handle_journey_created(
        &mut self,
        result: Result<shared::dto::journeys::TravelJourney, ApiError>,
    ) {
        let mut state = self.state.write();
        match result {
            Ok(journey) => {
                state.journeys.push(journey);
                state.dashboard.cache.invalidate();
            }
            Err(e) => state.last_error = Some(e.to_string()),
        }
    }

    fn handle_countries_loaded(
        &mut self,
        result: Result<Vec<shared::dto::locations::Country>, ApiError>,
    ) {
        let mut state = self.state.write();
        match result {
            Ok(countries) => state.countries = countries,
            Err(e) => state.last_error = Some(e.to_string()),
        }
    }

    fn handle_cities_loaded(
        &mut self,
        country_id: i64,
        result: Result<Vec<shared::dto::locations::City>, ApiError>,
    ) {
        let mut state = self.state.write();
        match result {
            Ok(cities) => {
                state.cities_by_country.insert(country_id, cities);
            }
            Err(e) => state.last_error = Some(e.to_string()),
        }
    }

    fn handle_search_results(&mut self, result: Result<Vec<Order>, ApiError>) {
        let mut state = self.state.write();
        state.search.searching = false;
        match result {
            Ok(orders) => {
                state.search.order_results = orders;
                state.search.error = None;
            }
            Err(e) => state.search.error = Some(e.to_string()),
        }
    }

    fn handle_picker_search_results(
        &mut self,
        result: Result<Vec<shared::dto::search::PickerSearchResult>, ApiError>,
    ) {
        let mut state = self.state.write();
        match result {
            Ok(pickers) => {
                state.search.picker_results = pickers;
                state.search.error = None;
            }
            Err(e) => state.search.error = Some(e.to_string()),
        }
    }
}
