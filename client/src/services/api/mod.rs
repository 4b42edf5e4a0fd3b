//! # Backend API Client Module
//!
//! HTTP client for the JetPicks REST API, one module per backend resource.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs           - Module exports and the ApiService impl
//! ├── client.rs        - ApiClient, auth header, error normalization
//! ├── auth.rs          - Login and registration
//! ├── profile.rs       - Profile read/update, avatar upload
//! ├── orders.rs        - Order creation and lifecycle transitions
//! ├── offers.rs        - Reward negotiation
//! ├── chat.rs          - Rooms and messages
//! ├── journeys.rs      - Picker travel journeys
//! ├── locations.rs     - Country/city reference data
//! ├── notifications.rs - Polling source for prompts
//! ├── dashboard.rs     - Aggregate feeds
//! └── search.rs        - Order and picker lookup
//! ```

pub mod auth;
pub mod chat;
pub mod client;
pub mod dashboard;
pub mod journeys;
pub mod locations;
pub mod notifications;
pub mod offers;
pub mod orders;
pub mod profile;
pub mod search;

pub use client::ApiClient;

use crate::core::error::ApiError;
use crate::core::service::{ApiService, ImagePart};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::dto::auth::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, UserProfile,
};
use shared::dto::chat::{
    ChatMessage, ChatRoom, GetOrCreateRoomRequest, MessagesPage, SendMessageRequest,
};
use shared::dto::dashboard::{OrdererDashboard, PickerDashboard};
use shared::dto::journeys::{CreateJourneyRequest, TravelJourney};
use shared::dto::locations::{City, Country, CreateCityRequest};
use shared::dto::notifications::Notification;
use shared::dto::offers::{CounterOfferRequest, Offer, OffersPage};
use shared::dto::orders::{AddItemRequest, CreateOrderRequest, Order, OrdersPage};
use shared::dto::search::{OrderSearchQuery, PickerSearchResult};

#[async_trait]
impl ApiService for ApiClient {
    async fn login(&self, req: LoginRequest) -> Result<AuthResponse, ApiError> {
        ApiClient::login(self, &req).await
    }

    async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, ApiError> {
        ApiClient::register(self, &req).await
    }

    async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        ApiClient::get_profile(self).await
    }

    async fn update_profile(&self, req: UpdateProfileRequest) -> Result<UserProfile, ApiError> {
        ApiClient::update_profile(self, &req).await
    }

    async fn upload_avatar(&self, avatar: ImagePart) -> Result<UserProfile, ApiError> {
        ApiClient::upload_avatar(self, avatar).await
    }

    async fn create_order(&self, req: CreateOrderRequest) -> Result<Order, ApiError> {
        ApiClient::create_order(self, &req).await
    }

    async fn get_order(&self, order_id: i64) -> Result<Order, ApiError> {
        ApiClient::get_order(self, order_id).await
    }

    async fn list_orders(&self, page: u32) -> Result<OrdersPage, ApiError> {
        ApiClient::list_orders(self, page).await
    }

    async fn add_order_item(
        &self,
        order_id: i64,
        req: AddItemRequest,
        images: Vec<ImagePart>,
    ) -> Result<Order, ApiError> {
        ApiClient::add_order_item(self, order_id, &req, images).await
    }

    async fn set_reward(&self, order_id: i64, reward: Decimal) -> Result<Order, ApiError> {
        ApiClient::set_reward(self, order_id, reward).await
    }

    async fn finalize_order(&self, order_id: i64) -> Result<Order, ApiError> {
        ApiClient::finalize_order(self, order_id).await
    }

    async fn accept_order(&self, order_id: i64) -> Result<Order, ApiError> {
        ApiClient::accept_order(self, order_id).await
    }

    async fn confirm_delivery(&self, order_id: i64) -> Result<Order, ApiError> {
        ApiClient::confirm_delivery(self, order_id).await
    }

    async fn cancel_order(&self, order_id: i64) -> Result<(), ApiError> {
        ApiClient::cancel_order(self, order_id).await
    }

    async fn get_offers(&self, order_id: i64, page: u32) -> Result<OffersPage, ApiError> {
        ApiClient::get_offers(self, order_id, page).await
    }

    async fn submit_counter_offer(&self, req: CounterOfferRequest) -> Result<Offer, ApiError> {
        ApiClient::submit_counter_offer(self, &req).await
    }

    async fn accept_offer(&self, offer_id: i64) -> Result<Offer, ApiError> {
        ApiClient::accept_offer(self, offer_id).await
    }

    async fn reject_offer(&self, offer_id: i64) -> Result<Offer, ApiError> {
        ApiClient::reject_offer(self, offer_id).await
    }

    async fn get_or_create_room(&self, req: GetOrCreateRoomRequest) -> Result<ChatRoom, ApiError> {
        ApiClient::get_or_create_room(self, &req).await
    }

    async fn list_rooms(&self) -> Result<Vec<ChatRoom>, ApiError> {
        ApiClient::list_rooms(self).await
    }

    async fn get_messages(
        &self,
        room_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<MessagesPage, ApiError> {
        ApiClient::get_messages(self, room_id, page, per_page).await
    }

    async fn send_message(
        &self,
        room_id: i64,
        req: SendMessageRequest,
    ) -> Result<ChatMessage, ApiError> {
        ApiClient::send_message(self, room_id, &req).await
    }

    async fn mark_message_read(&self, message_id: i64) -> Result<(), ApiError> {
        ApiClient::mark_message_read(self, message_id).await
    }

    async fn get_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        ApiClient::get_notifications(self).await
    }

    async fn get_unread_count(&self) -> Result<u32, ApiError> {
        ApiClient::get_unread_count(self).await
    }

    async fn mark_notification_read(&self, notification_id: i64) -> Result<(), ApiError> {
        ApiClient::mark_notification_read(self, notification_id).await
    }

    async fn get_picker_dashboard(&self) -> Result<PickerDashboard, ApiError> {
        ApiClient::get_picker_dashboard(self).await
    }

    async fn get_orderer_dashboard(&self) -> Result<OrdererDashboard, ApiError> {
        ApiClient::get_orderer_dashboard(self).await
    }

    async fn list_journeys(&self) -> Result<Vec<TravelJourney>, ApiError> {
        ApiClient::list_journeys(self).await
    }

    async fn create_journey(&self, req: CreateJourneyRequest) -> Result<TravelJourney, ApiError> {
        ApiClient::create_journey(self, &req).await
    }

    async fn get_countries(&self) -> Result<Vec<Country>, ApiError> {
        ApiClient::get_countries(self).await
    }

    async fn get_cities(&self, country_id: i64) -> Result<Vec<City>, ApiError> {
        ApiClient::get_cities(self, country_id).await
    }

    async fn create_city(&self, req: CreateCityRequest) -> Result<City, ApiError> {
        ApiClient::create_city(self, &req).await
    }

    async fn search_orders(&self, query: OrderSearchQuery) -> Result<Vec<Order>, ApiError> {
        ApiClient::search_orders(self, &query).await
    }

    async fn search_pickers(&self, query: &str) -> Result<Vec<PickerSearchResult>, ApiError> {
        ApiClient::search_pickers(self, query).await
    }
}
