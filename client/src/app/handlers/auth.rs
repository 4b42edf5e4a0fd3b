//! # Authentication Handlers
//!
//! Login and signup actions.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, AuthForm};
use crate::utils::validation;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::dto::auth::{LoginRequest, RegisterRequest, Role};
use std::sync::Arc;

/// Handle login submission
///
/// Internal handler function - use [`crate::app::App::handle_login`] instead.
pub(crate) fn handle_login(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    email: String,
    password: String,
) {
    if email.is_empty() || password.is_empty() {
        state.write().auth.set_error("Email and password required");
        return;
    }
    if let Err(message) = validation::validate_email(&email) {
        state.write().auth.set_error(message);
        return;
    }

    let api = match state.read().api.clone() {
        Some(api) => api,
        None => {
            state.write().auth.set_error("Backend not available");
            return;
        }
    };

    tokio::spawn(async move {
        let result = api.login(LoginRequest { email, password }).await;
        let _ = event_tx.send(AppEvent::LoginResult(result)).await;
    });
}

/// Handle signup submission
///
/// Internal handler function - use [`crate::app::App::handle_signup`] instead.
pub(crate) fn handle_signup(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    username: String,
    email: String,
    password: String,
    roles: Vec<Role>,
) {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        state.write().auth.set_error("All fields required");
        return;
    }
    if let Err(message) = validation::validate_username(&username) {
        state.write().auth.set_error(message);
        return;
    }
    if let Err(message) = validation::validate_email(&email) {
        state.write().auth.set_error(message);
        return;
    }
    if let Err(message) = validation::validate_password(&password) {
        state.write().auth.set_error(message);
        return;
    }
    if roles.is_empty() {
        state.write().auth.set_error("Pick at least one role");
        return;
    }

    let api = match state.read().api.clone() {
        Some(api) => api,
        None => {
            state.write().auth.set_error("Backend not available");
            return;
        }
    };

    tokio::spawn(async move {
        let result = api
            .register(RegisterRequest {
                username,
                email,
                password,
                roles,
            })
            .await;
        let _ = event_tx.send(AppEvent::RegisterResult(result)).await;
    });
}

/// Handle logout: clear the persisted session and return to login
pub(crate) fn handle_logout(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    state.current_user = None;
    state.auth = AuthForm::empty_login();
    state.current_screen = crate::app::state::Screen::Login;
    state.chat.poll_generation += 1;
    state.chat.active_room_id = None;
}
