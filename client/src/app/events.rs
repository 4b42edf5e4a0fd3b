//! # Application Events
//!
//! Results of background work, delivered over the event channel and
//! applied to [`crate::app::state::AppState`] on the owner's tick.

use crate::app::state::DashboardPayload;
use crate::core::error::ApiError;
use shared::dto::auth::{AuthResponse, UserProfile};
use shared::dto::chat::{ChatMessage, ChatRoom, MessagesPage};
use shared::dto::journeys::TravelJourney;
use shared::dto::locations::{City, Country};
use shared::dto::notifications::Notification;
use shared::dto::offers::{Offer, OffersPage};
use shared::dto::orders::{Order, OrdersPage};
use shared::dto::search::PickerSearchResult;

/// Events produced by spawned tasks and consumed by the state owner
#[derive(Debug)]
pub enum AppEvent {
    // --- Session ---
    LoginResult(Result<AuthResponse, ApiError>),
    RegisterResult(Result<AuthResponse, ApiError>),
    /// A 401 flipped the session from logged-in to logged-out.
    /// Emitted at most once per expiry by the HTTP client.
    SessionExpired,

    // --- Profile ---
    ProfileLoaded(Result<UserProfile, ApiError>),
    ProfileSaved(Result<UserProfile, ApiError>),
    /// Post-save poll observed the saved profile (or gave up)
    ProfileSettled(Option<UserProfile>),

    // --- Orders ---
    OrdersLoaded(Result<OrdersPage, ApiError>),
    OrderLoaded(Result<Order, ApiError>),
    OrderCreated(Result<Order, ApiError>),
    /// Any lifecycle mutation result: item added, reward set, finalize,
    /// accept, delivery confirmation
    OrderMutated(Result<Order, ApiError>),
    OrderCancelled(Result<i64, ApiError>),

    // --- Offers ---
    OffersLoaded {
        order_id: i64,
        result: Result<OffersPage, ApiError>,
    },
    OfferResolved(Result<Offer, ApiError>),

    // --- Chat ---
    RoomsLoaded(Result<Vec<ChatRoom>, ApiError>),
    RoomOpened(Result<ChatRoom, ApiError>),
    MessagesFetched {
        room_id: i64,
        /// True for the selection fetch, false for poll merges
        replace: bool,
        result: Result<MessagesPage, ApiError>,
    },
    MessageSent {
        room_id: i64,
        result: Result<ChatMessage, ApiError>,
    },

    // --- Dashboard / notifications ---
    DashboardLoaded(Result<DashboardPayload, ApiError>),
    NotificationsPolled(Vec<Notification>),
    UnreadCount(u32),

    // --- Journeys / reference data / search ---
    JourneysLoaded(Result<Vec<TravelJourney>, ApiError>),
    JourneyCreated(Result<TravelJourney, ApiError>),
    CountriesLoaded(Result<Vec<Country>, ApiError>),
    CitiesLoaded {
        country_id: i64,
        result: Result<Vec<City>, ApiError>,
    },
    SearchResults(Result<Vec<Order>, ApiError>),
    PickerSearchResults(Result<Vec<PickerSearchResult>, ApiError>),
}
