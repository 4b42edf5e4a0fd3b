//! # Application Orchestrator
//!
//! The [`App`] struct wires everything together: shared state behind
//! `Arc<RwLock<AppState>>`, action handlers that spawn API calls, and the
//! unbounded event channel carrying results back. The owner (UI shell or
//! test) calls `handle_*` methods for user actions and [`App::on_tick`]
//! regularly to apply queued events.
//!
//! ```text
//! handle_* (user action) ──▶ handlers ──▶ tokio::spawn ──▶ backend
//!                                                            │
//! on_tick ◀── event channel ◀── AppEvent (result) ◀──────────┘
//! ```
//!
//! Background polling (chat every 2 s, dashboard + notifications every
//! 30 s, profile after save) follows the same path: tasks only touch
//! state for guard flags and deliver results as events.

pub mod event_handler;
pub mod events;
pub mod handlers;
pub mod state;
pub mod tasks;

pub use events::AppEvent;
pub use state::{AppState, DashboardPayload, Screen};

use crate::app::event_handler::AppEventHandler;
use crate::core::service::{ApiService, ImagePart};
use crate::services::api::ApiClient;
use crate::services::session::SessionStore;
use async_channel::{Receiver, Sender};
use parking_lot::RwLock;
use shared::dto::auth::{Role, UpdateProfileRequest};
use shared::dto::journeys::CreateJourneyRequest;
use shared::dto::offers::Offer;
use shared::dto::search::OrderSearchQuery;
use std::sync::Arc;

/// Main application orchestrator
pub struct App {
    pub state: Arc<RwLock<AppState>>,
    pub(crate) session: Arc<SessionStore>,
    pub(crate) event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl App {
    /// Build the app against the real backend: load the persisted
    /// session, construct the HTTP client, and restore the screen.
    pub fn new() -> Self {
        let session = Arc::new(SessionStore::load(SessionStore::default_path()));
        let (event_tx, event_rx) = async_channel::unbounded();
        let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(
            Arc::clone(&session),
            event_tx.clone(),
        ));
        let state = AppState::new(Some(api), session.user());
        Self {
            state: Arc::new(RwLock::new(state)),
            session,
            event_tx,
            event_rx,
        }
    }

    /// Build the app with an injected API implementation
    pub fn with_parts(api: Arc<dyn ApiService>, session: Arc<SessionStore>) -> Self {
        let (event_tx, event_rx) = async_channel::unbounded();
        let state = AppState::new(Some(api), session.user());
        Self {
            state: Arc::new(RwLock::new(state)),
            session,
            event_tx,
            event_rx,
        }
    }

    /// Drain and apply queued events. Call once per frame/tick.
    pub fn on_tick(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Apply a single event to state
    pub fn handle_event(&mut self, event: AppEvent) {
        self.handle_event_impl(event);
    }

    /// Start the 30-second dashboard/notification background loop
    pub fn start_background_polling(&self) {
        tasks::dashboard::start_background_polling(Arc::clone(&self.state), self.event_tx.clone());
    }

    // --- Auth ---

    pub fn handle_login(&self, email: String, password: String) {
        handlers::auth::handle_login(Arc::clone(&self.state), self.event_tx.clone(), email, password);
    }

    pub fn handle_signup(&self, username: String, email: String, password: String, roles: Vec<Role>) {
        handlers::auth::handle_signup(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            username,
            email,
            password,
            roles,
        );
    }

    pub fn handle_logout(&self) {
        self.session.clear();
        handlers::auth::handle_logout(Arc::clone(&self.state));
    }

    // --- Navigation ---

    pub fn navigate(&self, screen: Screen) {
        handlers::navigation::handle_navigate(Arc::clone(&self.state), self.event_tx.clone(), screen);
    }

    /// App regained focus/visibility: force-refresh past the cache
    pub fn handle_visibility_regained(&self) {
        handlers::navigation::handle_visibility_regained(
            Arc::clone(&self.state),
            self.event_tx.clone(),
        );
    }

    // --- Orders ---

    pub fn handle_create_order(&self) {
        handlers::orders::handle_create_order(Arc::clone(&self.state), self.event_tx.clone());
    }

    pub fn handle_add_item(&self, name: String, price: String, quantity: u32, images: Vec<ImagePart>) {
        handlers::orders::handle_add_item(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            name,
            price,
            quantity,
            images,
        );
    }

    pub fn handle_set_reward(&self, reward: String) {
        handlers::orders::handle_set_reward(Arc::clone(&self.state), self.event_tx.clone(), reward);
    }

    pub fn handle_finalize_order(&self) {
        handlers::orders::handle_finalize_order(Arc::clone(&self.state), self.event_tx.clone());
    }

    pub fn handle_load_orders(&self, page: u32) {
        handlers::orders::handle_load_orders(Arc::clone(&self.state), self.event_tx.clone(), page);
    }

    pub fn handle_open_order(&self, order_id: i64) {
        handlers::orders::handle_open_order(Arc::clone(&self.state), self.event_tx.clone(), order_id);
    }

    pub fn handle_accept_order(&self, order_id: i64) {
        handlers::orders::handle_accept_order(Arc::clone(&self.state), self.event_tx.clone(), order_id);
    }

    pub fn handle_confirm_delivery(&self, order_id: i64) {
        handlers::orders::handle_confirm_delivery(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            order_id,
        );
    }

    pub fn handle_cancel_order(&self, order_id: i64) {
        handlers::orders::handle_cancel_order(Arc::clone(&self.state), self.event_tx.clone(), order_id);
    }

    // --- Offers ---

    /// The selected order's unresolved counter offer, if negotiation is live
    pub fn active_counter_offer(&self) -> Option<Offer> {
        let state = self.state.read();
        handlers::offers::active_counter_offer(&state.selected_order_offers).cloned()
    }

    pub fn handle_submit_counter_offer(&self, order_id: i64, amount: String) {
        handlers::offers::handle_submit_counter_offer(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            order_id,
            amount,
        );
    }

    pub fn handle_accept_offer(&self, offer_id: i64) {
        handlers::offers::handle_accept_offer(Arc::clone(&self.state), self.event_tx.clone(), offer_id);
    }

    pub fn handle_reject_offer(&self, offer_id: i64) {
        handlers::offers::handle_reject_offer(Arc::clone(&self.state), self.event_tx.clone(), offer_id);
    }

    // --- Chat ---

    pub fn handle_load_rooms(&self) {
        handlers::chat::handle_load_rooms(Arc::clone(&self.state), self.event_tx.clone());
    }

    pub fn handle_open_room(&self, order_id: i64, picker_id: i64) {
        handlers::chat::handle_open_room(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            order_id,
            picker_id,
        );
    }

    pub fn handle_select_room(&self, room_id: Option<i64>) {
        handlers::chat::handle_select_room(Arc::clone(&self.state), self.event_tx.clone(), room_id);
    }

    pub fn handle_send_message(&self) {
        handlers::chat::handle_send_message(Arc::clone(&self.state), self.event_tx.clone());
    }

    pub fn handle_mark_message_read(&self, message_id: i64) {
        handlers::chat::handle_mark_message_read(Arc::clone(&self.state), message_id);
    }

    // --- Notifications ---

    /// Mark a notification read: flip the local flag immediately, mirror
    /// to the backend best-effort (errors swallowed).
    pub fn handle_mark_notification_read(&self, notification_id: i64) {
        let api = {
            let mut state = self.state.write();
            state.notifications.mark_read_local(notification_id);
            state.api.clone()
        };
        let Some(api) = api else {
            return;
        };
        tokio::spawn(async move {
            if let Err(e) = api.mark_notification_read(notification_id).await {
                tracing::debug!(notification_id, error = %e, "mark notification read failed");
            }
        });
    }

    // --- Profile ---

    pub fn handle_load_profile(&self) {
        handlers::profile::handle_load_profile(Arc::clone(&self.state), self.event_tx.clone());
    }

    pub fn handle_save_profile(&self, request: UpdateProfileRequest) {
        handlers::profile::handle_save_profile(Arc::clone(&self.state), self.event_tx.clone(), request);
    }

    pub fn handle_upload_avatar(&self, avatar: ImagePart) {
        handlers::profile::handle_upload_avatar(Arc::clone(&self.state), self.event_tx.clone(), avatar);
    }

    // --- Reference data / search / journeys ---

    pub fn handle_load_countries(&self) {
        handlers::locations::handle_load_countries(Arc::clone(&self.state), self.event_tx.clone());
    }

    pub fn handle_load_cities(&self, country_id: i64) {
        handlers::locations::handle_load_cities(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            country_id,
        );
    }

    pub fn handle_create_city(&self, country_id: i64, name: String) {
        handlers::locations::handle_create_city(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            country_id,
            name,
        );
    }

    pub fn handle_search_orders(&self, query: OrderSearchQuery) {
        handlers::search::handle_search_orders(Arc::clone(&self.state), self.event_tx.clone(), query);
    }

    pub fn handle_search_pickers(&self, query: String) {
        handlers::search::handle_search_pickers(Arc::clone(&self.state), self.event_tx.clone(), query);
    }

    pub fn handle_load_journeys(&self) {
        handlers::search::handle_load_journeys(Arc::clone(&self.state), self.event_tx.clone());
    }

    pub fn handle_create_journey(&self, request: CreateJourneyRequest) {
        handlers::search::handle_create_journey(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            request,
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use shared::dto::auth::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
    use shared::dto::chat::{
        ChatMessage, ChatRoom, GetOrCreateRoomRequest, MessagesPage, SendMessageRequest,
    };
    use shared::dto::dashboard::{OrdererDashboard, PickerDashboard};
    use shared::dto::journeys::TravelJourney;
    use shared::dto::locations::{City, Country, CreateCityRequest};
    use shared::dto::notifications::Notification;
    use shared::dto::offers::{CounterOfferRequest, OffersPage};
    use shared::dto::orders::{
        AddItemRequest, CreateOrderRequest, Order, OrderItem, OrderStatus, OrdersPage,
    };
    use shared::dto::search::PickerSearchResult;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
    use std::time::Duration;

    fn not_mocked<T>() -> Result<T, ApiError> {
        Err(ApiError::NotFound("not mocked".to_string()))
    }

    fn test_user() -> UserProfile {
        UserProfile {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            roles: vec![Role::Orderer],
            phone: None,
            avatar_url: None,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    /// In-memory backend standing in for the HTTP client
    #[derive(Default)]
    struct MockApi {
        next_id: AtomicI64,
        orders: Mutex<HashMap<i64, Order>>,
        rooms: Mutex<Vec<ChatRoom>>,
        room_creations: AtomicU32,
        dashboard_fetches: AtomicU32,
        notification_polls: AtomicU32,
    }

    impl MockApi {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                next_id: AtomicI64::new(1),
                ..Default::default()
            })
        }

        fn next_id(&self) -> i64 {
            self.next_id.fetch_add(1, Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ApiService for MockApi {
        async fn login(&self, req: LoginRequest) -> Result<AuthResponse, ApiError> {
            if req.password == "wrong" {
                return Err(ApiError::Validation("Invalid credentials".to_string()));
            }
            Ok(AuthResponse {
                user: test_user(),
                token: "mock-token".to_string(),
            })
        }

        async fn register(&self, _req: RegisterRequest) -> Result<AuthResponse, ApiError> {
            Ok(AuthResponse {
                user: test_user(),
                token: "mock-token".to_string(),
            })
        }

        async fn get_profile(&self) -> Result<UserProfile, ApiError> {
            Ok(test_user())
        }

        async fn update_profile(&self, _req: UpdateProfileRequest) -> Result<UserProfile, ApiError> {
            Ok(test_user())
        }

        async fn upload_avatar(&self, _avatar: ImagePart) -> Result<UserProfile, ApiError> {
            not_mocked()
        }

        async fn create_order(&self, req: CreateOrderRequest) -> Result<Order, ApiError> {
            let order = Order {
                id: self.next_id(),
                orderer_id: 1,
                picker_id: req.picker_id,
                origin_city: req.origin_city,
                destination_city: req.destination_city,
                reward: Decimal::ZERO,
                status: OrderStatus::Draft,
                items: vec![],
                created_at: "2026-01-01T00:00:00Z".to_string(),
            };
            self.orders.lock().insert(order.id, order.clone());
            Ok(order)
        }

        async fn get_order(&self, order_id: i64) -> Result<Order, ApiError> {
            self.orders
                .lock()
                .get(&order_id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound("no such order".to_string()))
        }

        async fn list_orders(&self, _page: u32) -> Result<OrdersPage, ApiError> {
            let orders: Vec<Order> = self.orders.lock().values().cloned().collect();
            let total = orders.len() as u64;
            Ok(OrdersPage {
                orders,
                page: 1,
                per_page: 20,
                total,
            })
        }

        async fn add_order_item(
            &self,
            order_id: i64,
            req: AddItemRequest,
            _images: Vec<ImagePart>,
        ) -> Result<Order, ApiError> {
            let item_id = self.next_id();
            let mut orders = self.orders.lock();
            let order = orders
                .get_mut(&order_id)
                .ok_or_else(|| ApiError::NotFound("no such order".to_string()))?;
            order.items.push(OrderItem {
                id: item_id,
                name: req.name,
                price: req.price,
                quantity: req.quantity,
                image_urls: vec![],
            });
            Ok(order.clone())
        }

        async fn set_reward(&self, order_id: i64, reward: Decimal) -> Result<Order, ApiError> {
            let mut orders = self.orders.lock();
            let order = orders
                .get_mut(&order_id)
                .ok_or_else(|| ApiError::NotFound("no such order".to_string()))?;
            order.reward = reward;
            Ok(order.clone())
        }

        async fn finalize_order(&self, order_id: i64) -> Result<Order, ApiError> {
            let mut orders = self.orders.lock();
            let order = orders
                .get_mut(&order_id)
                .ok_or_else(|| ApiError::NotFound("no such order".to_string()))?;
            order.status = OrderStatus::Pending;
            Ok(order.clone())
        }

        async fn accept_order(&self, order_id: i64) -> Result<Order, ApiError> {
            let mut orders = self.orders.lock();
            let order = orders
                .get_mut(&order_id)
                .ok_or_else(|| ApiError::NotFound("no such order".to_string()))?;
            order.status = OrderStatus::Accepted;
            Ok(order.clone())
        }

        async fn confirm_delivery(&self, order_id: i64) -> Result<Order, ApiError> {
            let mut orders = self.orders.lock();
            let order = orders
                .get_mut(&order_id)
                .ok_or_else(|| ApiError::NotFound("no such order".to_string()))?;
            order.status = OrderStatus::Delivered;
            Ok(order.clone())
        }

        async fn cancel_order(&self, order_id: i64) -> Result<(), ApiError> {
            let mut orders = self.orders.lock();
            let order = orders
                .get_mut(&order_id)
                .ok_or_else(|| ApiError::NotFound("no such order".to_string()))?;
            order.status = OrderStatus::Cancelled;
            Ok(())
        }

        async fn get_offers(&self, _order_id: i64, _page: u32) -> Result<OffersPage, ApiError> {
            Ok(OffersPage {
                offers: vec![],
                page: 1,
                per_page: 20,
                total: 0,
            })
        }

        async fn submit_counter_offer(&self, _req: CounterOfferRequest) -> Result<Offer, ApiError> {
            not_mocked()
        }

        async fn accept_offer(&self, _offer_id: i64) -> Result<Offer, ApiError> {
            not_mocked()
        }

        async fn reject_offer(&self, _offer_id: i64) -> Result<Offer, ApiError> {
            not_mocked()
        }

        async fn get_or_create_room(
            &self,
            req: GetOrCreateRoomRequest,
        ) -> Result<ChatRoom, ApiError> {
            let mut rooms = self.rooms.lock();
            if let Some(existing) = rooms
                .iter()
                .find(|r| r.order_id == req.order_id && r.picker_id == req.picker_id)
            {
                return Ok(existing.clone());
            }
            let room = ChatRoom {
                id: self.next_id(),
                order_id: req.order_id,
                orderer_id: 1,
                picker_id: req.picker_id,
                unread_count: 0,
                last_message_at: None,
            };
            self.room_creations.fetch_add(1, Ordering::SeqCst);
            rooms.push(room.clone());
            Ok(room)
        }

        async fn list_rooms(&self) -> Result<Vec<ChatRoom>, ApiError> {
            Ok(self.rooms.lock().clone())
        }

        async fn get_messages(
            &self,
            _room_id: i64,
            page: u32,
            per_page: u32,
        ) -> Result<MessagesPage, ApiError> {
            Ok(MessagesPage {
                messages: vec![],
                page,
                per_page,
                total: 0,
            })
        }

        async fn send_message(
            &self,
            room_id: i64,
            req: SendMessageRequest,
        ) -> Result<ChatMessage, ApiError> {
            Ok(ChatMessage {
                id: self.next_id(),
                room_id,
                sender_id: 1,
                content: req.content,
                translated_content: None,
                read: false,
                created_at: "2026-01-01T00:00:00Z".to_string(),
            })
        }

        async fn mark_message_read(&self, _message_id: i64) -> Result<(), ApiError> {
            Ok(())
        }

        async fn get_notifications(&self) -> Result<Vec<Notification>, ApiError> {
            self.notification_polls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn get_unread_count(&self) -> Result<u32, ApiError> {
            Ok(0)
        }

        async fn mark_notification_read(&self, _notification_id: i64) -> Result<(), ApiError> {
            Ok(())
        }

        async fn get_picker_dashboard(&self) -> Result<PickerDashboard, ApiError> {
            self.dashboard_fetches.fetch_add(1, Ordering::SeqCst);
            Ok(PickerDashboard {
                available_orders: vec![],
                journeys: vec![],
            })
        }

        async fn get_orderer_dashboard(&self) -> Result<OrdererDashboard, ApiError> {
            self.dashboard_fetches.fetch_add(1, Ordering::SeqCst);
            Ok(OrdererDashboard {
                orders: vec![],
                pending_offers: vec![],
            })
        }

        async fn list_journeys(&self) -> Result<Vec<TravelJourney>, ApiError> {
            Ok(vec![])
        }

        async fn create_journey(&self, _req: CreateJourneyRequest) -> Result<TravelJourney, ApiError> {
            not_mocked()
        }

        async fn get_countries(&self) -> Result<Vec<Country>, ApiError> {
            Ok(vec![Country {
                id: 1,
                name: "Spain".to_string(),
                code: "ES".to_string(),
            }])
        }

        async fn get_cities(&self, country_id: i64) -> Result<Vec<City>, ApiError> {
            Ok(vec![City {
                id: 1,
                country_id,
                name: "Madrid".to_string(),
            }])
        }

        async fn create_city(&self, _req: CreateCityRequest) -> Result<City, ApiError> {
            not_mocked()
        }

        async fn search_orders(&self, _query: OrderSearchQuery) -> Result<Vec<Order>, ApiError> {
            Ok(vec![])
        }

        async fn search_pickers(&self, _query: &str) -> Result<Vec<PickerSearchResult>, ApiError> {
            Ok(vec![])
        }
    }

    fn temp_session(tag: &str, logged_in: bool) -> Arc<SessionStore> {
        let path = std::env::temp_dir().join(format!(
            "jetpicks-app-test-{}-{}.json",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let session = Arc::new(SessionStore::load(path));
        if logged_in {
            session.store(&AuthResponse {
                user: test_user(),
                token: "mock-token".to_string(),
            });
        }
        session
    }

    fn test_app(tag: &str, logged_in: bool) -> (App, Arc<MockApi>, Arc<SessionStore>) {
        let mock = MockApi::new();
        let session = temp_session(tag, logged_in);
        let app = App::with_parts(mock.clone() as Arc<dyn ApiService>, Arc::clone(&session));
        (app, mock, session)
    }

    /// Let spawned tasks finish, then apply their events
    async fn settle(app: &mut App) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.on_tick();
    }

    fn cleanup(session: &SessionStore) {
        let _ = std::fs::remove_file(session.path());
    }

    #[tokio::test]
    async fn test_login_flow_stores_session_and_navigates() {
        let (mut app, _mock, session) = test_app("login", false);
        assert_eq!(app.state.read().current_screen, Screen::Login);

        app.handle_login("alice@example.com".to_string(), "password123".to_string());
        settle(&mut app).await;

        {
            let state = app.state.read();
            assert_eq!(state.current_screen, Screen::Dashboard);
            assert_eq!(state.current_user.as_ref().map(|u| u.id), Some(1));
        }
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("mock-token"));

        cleanup(&session);
    }

    #[tokio::test]
    async fn test_failed_login_surfaces_inline_error() {
        let (mut app, _mock, session) = test_app("login-fail", false);

        app.handle_login("alice@example.com".to_string(), "wrong".to_string());
        settle(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.current_screen, Screen::Login);
        match &state.auth {
            state::AuthForm::Login { error, .. } => {
                assert_eq!(error.as_deref(), Some("Invalid credentials"));
            }
            other => panic!("unexpected auth form: {:?}", other),
        }
        drop(state);
        assert!(!session.is_authenticated());

        cleanup(&session);
    }

    #[tokio::test]
    async fn test_session_expired_returns_to_login_and_stops_chat_poll() {
        let (mut app, _mock, session) = test_app("expired", true);
        {
            let mut state = app.state.write();
            state.current_screen = Screen::Chat;
            state.chat.active_room_id = Some(9);
        }
        let generation_before = app.state.read().chat.poll_generation;

        app.handle_event(AppEvent::SessionExpired);

        let state = app.state.read();
        assert_eq!(state.current_screen, Screen::Login);
        assert!(state.current_user.is_none());
        assert!(state.chat.active_room_id.is_none());
        assert!(state.chat.poll_generation > generation_before);
        drop(state);

        cleanup(&session);
    }

    #[tokio::test]
    async fn test_order_wizard_reaches_pending_with_fee_total() {
        let (mut app, _mock, session) = test_app("wizard", true);
        {
            let mut state = app.state.write();
            state.draft.origin_city = "Madrid".to_string();
            state.draft.destination_city = "Paris".to_string();
        }

        app.handle_create_order();
        settle(&mut app).await;
        let order_id = app.state.read().draft.order_id.unwrap();

        app.handle_add_item("Watch".to_string(), "50".to_string(), 1, vec![]);
        settle(&mut app).await;
        assert_eq!(app.state.read().draft.items.len(), 1);

        app.handle_set_reward("25".to_string());
        settle(&mut app).await;
        assert_eq!(app.state.read().draft.reward, Some(dec!(25)));

        app.handle_finalize_order();
        settle(&mut app).await;

        let state = app.state.read();
        let order = state
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .expect("finalized order in state");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items_count(), 1);
        // 50 items + 25 reward + 1.5% service fee on 75
        assert_eq!(order.total_cost(), dec!(76.125));
        // Wizard is done: the draft slot is cleared for the next order
        assert!(state.draft.order_id.is_none());
        drop(state);

        cleanup(&session);
    }

    #[tokio::test]
    async fn test_room_get_or_create_is_idempotent() {
        let (mut app, mock, session) = test_app("rooms", true);

        app.handle_open_room(7, 3);
        settle(&mut app).await;
        let first_id = app.state.read().chat.rooms[0].id;

        app.handle_open_room(7, 3);
        settle(&mut app).await;

        let state = app.state.read();
        assert_eq!(mock.room_creations.load(Ordering::SeqCst), 1);
        assert_eq!(state.chat.rooms.len(), 1);
        assert_eq!(state.chat.rooms[0].id, first_id);
        assert_eq!(state.chat.active_room_id, Some(first_id));
        drop(state);

        cleanup(&session);
    }

    #[tokio::test]
    async fn test_dashboard_cache_blocks_refetch_until_invalidated() {
        let (mut app, mock, session) = test_app("cache", true);

        // Cold cache: fetch hits the network
        assert!(tasks::dashboard::fetch_once(&app.state, &app.event_tx, false).await);
        app.on_tick();
        assert_eq!(mock.dashboard_fetches.load(Ordering::SeqCst), 1);
        assert!(app.state.read().dashboard.cache.fresh().is_some());

        // Fresh cache: fetch is skipped entirely
        assert!(!tasks::dashboard::fetch_once(&app.state, &app.event_tx, false).await);
        assert_eq!(mock.dashboard_fetches.load(Ordering::SeqCst), 1);

        // skip_cache bypasses a still-fresh slot
        assert!(tasks::dashboard::fetch_once(&app.state, &app.event_tx, true).await);
        app.on_tick();
        assert_eq!(mock.dashboard_fetches.load(Ordering::SeqCst), 2);

        // Mutation invalidates, next normal fetch goes out
        app.state.write().dashboard.cache.invalidate();
        assert!(tasks::dashboard::fetch_once(&app.state, &app.event_tx, false).await);
        app.on_tick();
        assert_eq!(mock.dashboard_fetches.load(Ordering::SeqCst), 3);

        cleanup(&session);
    }

    #[tokio::test]
    async fn test_notification_poll_skips_while_one_is_in_flight() {
        let (app, mock, session) = test_app("notif-guard", true);

        // A poll already in flight holds the flag; a second caller backs off
        app.state.write().notifications.polling = true;
        assert!(!tasks::notifications::poll_once(&app.state, &app.event_tx).await);
        assert_eq!(mock.notification_polls.load(Ordering::SeqCst), 0);

        // Once it clears, the next iteration polls and releases the flag
        app.state.write().notifications.polling = false;
        assert!(tasks::notifications::poll_once(&app.state, &app.event_tx).await);
        assert_eq!(mock.notification_polls.load(Ordering::SeqCst), 1);
        assert!(!app.state.read().notifications.polling);

        cleanup(&session);
    }

    #[tokio::test]
    async fn test_order_mutation_invalidates_dashboard_cache() {
        let (mut app, _mock, session) = test_app("cache-invalidate", true);

        assert!(tasks::dashboard::fetch_once(&app.state, &app.event_tx, false).await);
        app.on_tick();
        assert!(app.state.read().dashboard.cache.fresh().is_some());

        {
            let mut state = app.state.write();
            state.draft.origin_city = "Madrid".to_string();
            state.draft.destination_city = "Paris".to_string();
        }
        app.handle_create_order();
        settle(&mut app).await;
        app.handle_add_item("Watch".to_string(), "50".to_string(), 1, vec![]);
        settle(&mut app).await;

        assert!(app.state.read().dashboard.cache.fresh().is_none());
        assert!(app.state.read().dashboard.cache.last().is_some());

        cleanup(&session);
    }

    #[tokio::test]
    async fn test_poll_merge_appends_without_reordering() {
        let (mut app, _mock, session) = test_app("chat-merge", true);

        let msg = |id: i64, content: &str| ChatMessage {
            id,
            room_id: 4,
            sender_id: 2,
            content: content.to_string(),
            translated_content: None,
            read: false,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };
        let page = |messages: Vec<ChatMessage>| MessagesPage {
            total: messages.len() as u64,
            messages,
            page: 1,
            per_page: 50,
        };

        // Selection fetch replaces
        app.handle_event(AppEvent::MessagesFetched {
            room_id: 4,
            replace: true,
            result: Ok(page(vec![msg(1, "hi"), msg(2, "hello")])),
        });
        // Poll fetch overlaps and carries one new message
        app.handle_event(AppEvent::MessagesFetched {
            room_id: 4,
            replace: false,
            result: Ok(page(vec![msg(2, "hello edited"), msg(3, "new")])),
        });

        let state = app.state.read();
        let messages = state.chat.messages_for(4);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].id, 1);
        assert_eq!(messages[1].content, "hello");
        assert_eq!(messages[2].id, 3);
        drop(state);

        cleanup(&session);
    }

    #[tokio::test]
    async fn test_notification_prompt_set_for_newest_arrival() {
        let (mut app, _mock, session) = test_app("notify", true);

        let note = |id: i64| Notification {
            id,
            kind: shared::dto::notifications::NotificationKind::AcceptedOrder,
            order_id: 1,
            offer_id: None,
            message: format!("order accepted {}", id),
            read: false,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };

        app.handle_event(AppEvent::NotificationsPolled(vec![note(1), note(2)]));
        assert_eq!(
            app.state.read().notifications.prompt.as_ref().map(|n| n.id),
            Some(2)
        );

        // A repeat poll with no new ids leaves the prompt alone
        app.state.write().notifications.prompt = None;
        app.handle_event(AppEvent::NotificationsPolled(vec![note(1), note(2)]));
        assert!(app.state.read().notifications.prompt.is_none());
        assert_eq!(app.state.read().notifications.unread_count(), 2);

        cleanup(&session);
    }
}
