//! # Application State Types
//!
//! All state owned by the engine: screen/navigation state, the order draft
//! in progress, chat polling state, the notification projection, and the
//! dashboard cache with its 5-minute validity window.

use crate::core::service::ApiService;
use rust_decimal::Decimal;
use shared::dto::auth::{Role, UserProfile};
use shared::dto::chat::{ChatMessage, ChatRoom};
use shared::dto::dashboard::{OrdererDashboard, PickerDashboard};
use shared::dto::locations::{City, Country};
use shared::dto::notifications::Notification;
use shared::dto::offers::Offer;
use shared::dto::orders::{Order, OrderItem};
use shared::dto::search::PickerSearchResult;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a dashboard snapshot stays valid
pub const DASHBOARD_TTL: Duration = Duration::from_secs(5 * 60);

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login form
    Login,
    /// Signup form
    Signup,
    /// Role-specific aggregate feed
    Dashboard,
    /// Order creation wizard (route, items, reward, finalize)
    OrderWizard,
    /// The user's own orders
    Orders,
    /// One order with its offer history
    OrderDetail,
    /// Chat rooms and the active conversation
    Chat,
    /// Notification history
    Notifications,
    /// Picker travel journeys
    Journeys,
    /// Order/picker search
    Search,
    /// Profile editing
    Profile,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Login,
            Screen::Signup,
            Screen::Dashboard,
            Screen::OrderWizard,
            Screen::Orders,
            Screen::OrderDetail,
            Screen::Chat,
            Screen::Notifications,
            Screen::Journeys,
            Screen::Search,
            Screen::Profile,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Signup => "Sign Up",
            Screen::Dashboard => "Dashboard",
            Screen::OrderWizard => "New Order",
            Screen::Orders => "My Orders",
            Screen::OrderDetail => "Order",
            Screen::Chat => "Chat",
            Screen::Notifications => "Notifications",
            Screen::Journeys => "My Journeys",
            Screen::Search => "Search",
            Screen::Profile => "Profile",
        }
    }
}

/// Authentication form sub-state
#[derive(Debug, Clone, PartialEq)]
pub enum AuthForm {
    Login {
        email: String,
        password: String,
        error: Option<String>,
    },
    Signup {
        username: String,
        email: String,
        password: String,
        roles: Vec<Role>,
        error: Option<String>,
    },
}

impl AuthForm {
    pub fn empty_login() -> Self {
        AuthForm::Login {
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn empty_signup() -> Self {
        AuthForm::Signup {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            roles: Vec::new(),
            error: None,
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        match self {
            AuthForm::Login { error, .. } | AuthForm::Signup { error, .. } => {
                *error = Some(message.into())
            }
        }
    }
}

/// The order-draft-in-progress cache backing the creation wizard
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    /// Server-side order id once the draft has been created
    pub order_id: Option<i64>,
    pub origin_city: String,
    pub destination_city: String,
    /// Set for direct-to-picker orders
    pub picker_id: Option<i64>,
    pub items: Vec<OrderItem>,
    pub reward: Option<Decimal>,
    pub submitting: bool,
    pub error: Option<String>,
}

/// Chat state: rooms, per-room message lists, and the polling guard
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub rooms: Vec<ChatRoom>,
    /// The room the 2-second poll loop is attached to, if any
    pub active_room_id: Option<i64>,
    /// Messages keyed by room id, append-only within a session
    pub messages: HashMap<i64, Vec<ChatMessage>>,
    /// Bumped on every room (de)selection; a poll loop exits when its
    /// generation goes stale, so re-selection never stacks timers
    pub poll_generation: u64,
    pub message_input: String,
    pub sending: bool,
    pub error: Option<String>,
}

impl ChatState {
    pub fn messages_for(&self, room_id: i64) -> &[ChatMessage] {
        self.messages.get(&room_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Notification projection: two independently maintained histories,
/// concatenated for display and unread-counted together.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    pub accepted_orders: Vec<Notification>,
    pub counter_offers: Vec<Notification>,
    /// Transient prompt for the newest arrival; auto-dismissed by the
    /// owner after a fixed delay, which does NOT mark the item read
    pub prompt: Option<Notification>,
    /// Server-reported unread count (includes items outside the polled page)
    pub server_unread: u32,
    pub polling: bool,
}

impl NotificationState {
    /// Combined history for display: accepted orders then counter offers
    pub fn history(&self) -> Vec<&Notification> {
        self.accepted_orders
            .iter()
            .chain(self.counter_offers.iter())
            .collect()
    }

    /// Unread items across both histories
    pub fn unread_count(&self) -> usize {
        self.history().iter().filter(|n| !n.read).count()
    }

    /// Absorb a poll result; returns the notifications not seen before,
    /// in server order. Known ids are never replaced or reordered.
    pub fn absorb(&mut self, polled: Vec<Notification>) -> Vec<Notification> {
        use shared::dto::notifications::NotificationKind;
        let known: std::collections::HashSet<i64> = self
            .accepted_orders
            .iter()
            .chain(self.counter_offers.iter())
            .map(|n| n.id)
            .collect();
        let fresh: Vec<Notification> = polled
            .into_iter()
            .filter(|n| !known.contains(&n.id))
            .collect();
        for notification in &fresh {
            match notification.kind {
                NotificationKind::AcceptedOrder => {
                    self.accepted_orders.push(notification.clone())
                }
                NotificationKind::CounterOffer => self.counter_offers.push(notification.clone()),
            }
        }
        fresh
    }

    /// Flip the local read flag; the backend mirror call is the caller's
    /// (best-effort) job
    pub fn mark_read_local(&mut self, notification_id: i64) {
        for notification in self
            .accepted_orders
            .iter_mut()
            .chain(self.counter_offers.iter_mut())
        {
            if notification.id == notification_id {
                notification.read = true;
            }
        }
    }
}

/// The cached aggregate payload, whichever role it was fetched for
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardPayload {
    Picker(PickerDashboard),
    Orderer(OrdererDashboard),
}

impl DashboardPayload {
    /// Available orders whose route is covered by one of the picker's
    /// journeys. Empty for an orderer payload.
    pub fn journey_matched_orders(&self) -> Vec<&Order> {
        let Self::Picker(dashboard) = self else {
            return Vec::new();
        };
        dashboard
            .available_orders
            .iter()
            .filter(|order| {
                dashboard
                    .journeys
                    .iter()
                    .any(|journey| journey.matches_route(&order.origin_city, &order.destination_city))
            })
            .collect()
    }
}

/// Single-slot dashboard cache: one payload, one capture timestamp.
/// Valid only while not invalidated and younger than the TTL.
#[derive(Debug)]
pub struct DashboardCache {
    payload: Option<DashboardPayload>,
    fetched_at: Option<Instant>,
    invalidated: bool,
    ttl: Duration,
}

impl Default for DashboardCache {
    fn default() -> Self {
        Self::with_ttl(DASHBOARD_TTL)
    }
}

impl DashboardCache {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            payload: None,
            fetched_at: None,
            invalidated: false,
            ttl,
        }
    }

    /// The cached payload, if it is still valid
    pub fn fresh(&self) -> Option<&DashboardPayload> {
        if self.invalidated {
            return None;
        }
        match (&self.payload, self.fetched_at) {
            (Some(payload), Some(at)) if at.elapsed() < self.ttl => Some(payload),
            _ => None,
        }
    }

    /// Replace the slot wholesale and restart the validity window
    pub fn store(&mut self, payload: DashboardPayload) {
        self.payload = Some(payload);
        self.fetched_at = Some(Instant::now());
        self.invalidated = false;
    }

    /// Mark stale after a mutation; the payload stays readable via
    /// [`Self::last`] until the next fetch replaces it
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Last known payload regardless of validity (stale render fallback)
    pub fn last(&self) -> Option<&DashboardPayload> {
        self.payload.as_ref()
    }
}

/// Dashboard screen state: the cache plus an in-progress flag that blocks
/// duplicate fetches of the same kind
#[derive(Debug, Default)]
pub struct DashboardState {
    pub cache: DashboardCache,
    pub fetching: bool,
    pub error: Option<String>,
}

/// Profile screen state
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub saving: bool,
    /// Guard for the post-save poll loop; one loop at a time
    pub polling_after_save: bool,
    pub error: Option<String>,
}

/// Search screen state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub order_results: Vec<Order>,
    pub picker_results: Vec<PickerSearchResult>,
    pub searching: bool,
    pub error: Option<String>,
}

/// Global application state
pub struct AppState {
    pub current_screen: Screen,
    pub auth: AuthForm,
    /// Cached copy of the logged-in user (authoritative copy is server-side)
    pub current_user: Option<UserProfile>,
    pub draft: OrderDraft,
    pub orders: Vec<Order>,
    pub selected_order: Option<Order>,
    /// Offer history for the selected order, server order preserved
    pub selected_order_offers: Vec<Offer>,
    pub chat: ChatState,
    pub notifications: NotificationState,
    pub dashboard: DashboardState,
    pub journeys: Vec<shared::dto::journeys::TravelJourney>,
    pub profile: ProfileState,
    pub search: SearchState,
    pub countries: Vec<Country>,
    /// Per-country cities cache, held in memory for the session
    pub cities_by_country: HashMap<i64, Vec<City>>,
    /// Inline error from the most recent user action
    pub last_error: Option<String>,
    /// API seam; trait object so tests can substitute a mock backend
    pub api: Option<Arc<dyn ApiService>>,
}

impl AppState {
    pub fn new(api: Option<Arc<dyn ApiService>>, current_user: Option<UserProfile>) -> Self {
        let current_screen = if current_user.is_some() {
            Screen::Dashboard
        } else {
            Screen::Login
        };
        Self {
            current_screen,
            auth: AuthForm::empty_login(),
            current_user,
            draft: OrderDraft::default(),
            orders: Vec::new(),
            selected_order: None,
            selected_order_offers: Vec::new(),
            chat: ChatState::default(),
            notifications: NotificationState::default(),
            dashboard: DashboardState::default(),
            journeys: Vec::new(),
            profile: ProfileState::default(),
            search: SearchState::default(),
            countries: Vec::new(),
            cities_by_country: HashMap::new(),
            last_error: None,
            api,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Screens that need a session
    pub fn requires_auth(screen: Screen) -> bool {
        !matches!(screen, Screen::Login | Screen::Signup)
    }

    /// Whether the logged-in user holds the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.current_user
            .as_ref()
            .map(|u| u.has_role(role))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::dto::journeys::TravelJourney;
    use shared::dto::notifications::NotificationKind;
    use shared::dto::orders::OrderStatus;

    fn notification(id: i64, kind: NotificationKind, read: bool) -> Notification {
        Notification {
            id,
            kind,
            order_id: 1,
            offer_id: None,
            message: format!("notification {}", id),
            read,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_requires_auth() {
        assert!(!AppState::requires_auth(Screen::Login));
        assert!(!AppState::requires_auth(Screen::Signup));
        assert!(AppState::requires_auth(Screen::Dashboard));
        assert!(AppState::requires_auth(Screen::Chat));
    }

    fn pending_order(id: i64, origin: &str, destination: &str) -> Order {
        Order {
            id,
            orderer_id: 1,
            picker_id: None,
            origin_city: origin.to_string(),
            destination_city: destination.to_string(),
            reward: Decimal::ZERO,
            status: OrderStatus::Pending,
            items: vec![],
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn journey(id: i64, origin: &str, destination: &str) -> TravelJourney {
        TravelJourney {
            id,
            picker_id: 2,
            origin_city: origin.to_string(),
            destination_city: destination.to_string(),
            departure_date: "2026-03-01T00:00:00Z".to_string(),
            arrival_date: "2026-03-05T00:00:00Z".to_string(),
            capacity_kg: dec!(10),
        }
    }

    #[test]
    fn test_journey_matched_orders_filters_by_route() {
        let payload = DashboardPayload::Picker(PickerDashboard {
            available_orders: vec![
                pending_order(1, "Madrid", "Paris"),
                pending_order(2, "Berlin", "Rome"),
                pending_order(3, "Madrid", "Paris"),
            ],
            journeys: vec![journey(10, "Madrid", "Paris")],
        });
        let matched: Vec<i64> = payload
            .journey_matched_orders()
            .iter()
            .map(|order| order.id)
            .collect();
        assert_eq!(matched, vec![1, 3]);
    }

    #[test]
    fn test_journey_matched_orders_empty_for_orderer() {
        let payload = DashboardPayload::Orderer(OrdererDashboard {
            orders: vec![pending_order(1, "Madrid", "Paris")],
            pending_offers: vec![],
        });
        assert!(payload.journey_matched_orders().is_empty());
    }

    #[test]
    fn test_notification_absorb_dedupes_by_id() {
        let mut state = NotificationState::default();
        let fresh = state.absorb(vec![
            notification(1, NotificationKind::AcceptedOrder, false),
            notification(2, NotificationKind::CounterOffer, false),
        ]);
        assert_eq!(fresh.len(), 2);

        // Second poll repeats id 1, adds id 3
        let fresh = state.absorb(vec![
            notification(1, NotificationKind::AcceptedOrder, false),
            notification(3, NotificationKind::CounterOffer, false),
        ]);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, 3);

        assert_eq!(state.accepted_orders.len(), 1);
        assert_eq!(state.counter_offers.len(), 2);
    }

    #[test]
    fn test_notification_history_concatenated_and_counted_together() {
        let mut state = NotificationState::default();
        state.absorb(vec![
            notification(1, NotificationKind::AcceptedOrder, false),
            notification(2, NotificationKind::CounterOffer, true),
            notification(3, NotificationKind::CounterOffer, false),
        ]);
        let history = state.history();
        assert_eq!(history.len(), 3);
        // Accepted orders first, then counter offers
        assert_eq!(history[0].id, 1);
        assert_eq!(state.unread_count(), 2);

        state.mark_read_local(3);
        assert_eq!(state.unread_count(), 1);
    }

    #[test]
    fn test_dashboard_cache_ttl_and_invalidation() {
        let mut cache = DashboardCache::with_ttl(Duration::from_millis(40));
        assert!(cache.fresh().is_none());

        cache.store(DashboardPayload::Orderer(OrdererDashboard {
            orders: vec![],
            pending_offers: vec![],
        }));
        assert!(cache.fresh().is_some());

        cache.invalidate();
        assert!(cache.fresh().is_none());
        assert!(cache.last().is_some());

        // Re-store restarts the window, then the TTL runs out
        cache.store(DashboardPayload::Orderer(OrdererDashboard {
            orders: vec![],
            pending_offers: vec![],
        }));
        assert!(cache.fresh().is_some());
        std::thread::sleep(Duration::from_millis(50));
        assert!(cache.fresh().is_none());
    }
}
