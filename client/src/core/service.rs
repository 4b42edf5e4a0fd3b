//! # Service Traits
//!
//! The [`ApiService`] trait is the seam between the application layer and
//! the HTTP client. Handlers and polling tasks hold an
//! `Arc<dyn ApiService>`, so tests can substitute a mock backend without
//! any network.

use crate::core::error::ApiError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::dto::auth::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, UserProfile,
};
use shared::dto::chat::{ChatMessage, ChatRoom, GetOrCreateRoomRequest, MessagesPage, SendMessageRequest};
use shared::dto::dashboard::{OrdererDashboard, PickerDashboard};
use shared::dto::locations::{City, Country, CreateCityRequest};
use shared::dto::notifications::Notification;
use shared::dto::offers::{CounterOfferRequest, Offer, OffersPage};
use shared::dto::orders::{AddItemRequest, CreateOrderRequest, Order, OrdersPage};
use shared::dto::search::{OrderSearchQuery, PickerSearchResult};

/// Named image payload for multipart uploads: (filename, bytes)
pub type ImagePart = (String, Vec<u8>);

/// Backend API operations, one method per endpoint.
///
/// Implemented by [`crate::services::api::ApiClient`] over HTTP and by mock
/// backends in tests.
#[async_trait]
pub trait ApiService: Send + Sync {
    // Auth
    async fn login(&self, req: LoginRequest) -> Result<AuthResponse, ApiError>;
    async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, ApiError>;

    // Profile
    async fn get_profile(&self) -> Result<UserProfile, ApiError>;
    async fn update_profile(&self, req: UpdateProfileRequest) -> Result<UserProfile, ApiError>;
    async fn upload_avatar(&self, avatar: ImagePart) -> Result<UserProfile, ApiError>;

    // Orders
    async fn create_order(&self, req: CreateOrderRequest) -> Result<Order, ApiError>;
    async fn get_order(&self, order_id: i64) -> Result<Order, ApiError>;
    async fn list_orders(&self, page: u32) -> Result<OrdersPage, ApiError>;
    async fn add_order_item(
        &self,
        order_id: i64,
        req: AddItemRequest,
        images: Vec<ImagePart>,
    ) -> Result<Order, ApiError>;
    async fn set_reward(&self, order_id: i64, reward: Decimal) -> Result<Order, ApiError>;
    async fn finalize_order(&self, order_id: i64) -> Result<Order, ApiError>;
    async fn accept_order(&self, order_id: i64) -> Result<Order, ApiError>;
    async fn confirm_delivery(&self, order_id: i64) -> Result<Order, ApiError>;
    async fn cancel_order(&self, order_id: i64) -> Result<(), ApiError>;

    // Offers
    async fn get_offers(&self, order_id: i64, page: u32) -> Result<OffersPage, ApiError>;
    async fn submit_counter_offer(&self, req: CounterOfferRequest) -> Result<Offer, ApiError>;
    async fn accept_offer(&self, offer_id: i64) -> Result<Offer, ApiError>;
    async fn reject_offer(&self, offer_id: i64) -> Result<Offer, ApiError>;

    // Chat
    async fn get_or_create_room(&self, req: GetOrCreateRoomRequest) -> Result<ChatRoom, ApiError>;
    async fn list_rooms(&self) -> Result<Vec<ChatRoom>, ApiError>;
    async fn get_messages(
        &self,
        room_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<MessagesPage, ApiError>;
    async fn send_message(
        &self,
        room_id: i64,
        req: SendMessageRequest,
    ) -> Result<ChatMessage, ApiError>;
    async fn mark_message_read(&self, message_id: i64) -> Result<(), ApiError>;

    // Notifications
    async fn get_notifications(&self) -> Result<Vec<Notification>, ApiError>;
    async fn get_unread_count(&self) -> Result<u32, ApiError>;
    async fn mark_notification_read(&self, notification_id: i64) -> Result<(), ApiError>;

    // Dashboards
    async fn get_picker_dashboard(&self) -> Result<PickerDashboard, ApiError>;
    async fn get_orderer_dashboard(&self) -> Result<OrdererDashboard, ApiError>;

    // Journeys
    async fn list_journeys(&self) -> Result<Vec<shared::dto::journeys::TravelJourney>, ApiError>;
    async fn create_journey(
        &self,
        req: shared::dto::journeys::CreateJourneyRequest,
    ) -> Result<shared::dto::journeys::TravelJourney, ApiError>;

    // Locations
    async fn get_countries(&self) -> Result<Vec<Country>, ApiError>;
    async fn get_cities(&self, country_id: i64) -> Result<Vec<City>, ApiError>;
    async fn create_city(&self, req: CreateCityRequest) -> Result<City, ApiError>;

    // Search
    async fn search_orders(&self, query: OrderSearchQuery) -> Result<Vec<Order>, ApiError>;
    async fn search_pickers(&self, query: &str) -> Result<Vec<PickerSearchResult>, ApiError>;
}
