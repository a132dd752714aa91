//! Mock session and theme preference
//!
//! Both live in one [`AppState`] that is initialised from a key-value store
//! (browser `localStorage` in the web app) and mutated only through
//! `login`, `logout` and `toggle_theme`. This is a demo gate, not security:
//! any username is accepted together with the fixed password.

use crate::config::StorageKeys;
use crate::error::{AuthError, StoreError};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const MOCK_PASSWORD: &str = "test123";
pub const MOCK_TOKEN: &str = "mock_jwt_token_for_saas_dashboard";

/// Artificial latency of the sign-in button
pub const LOGIN_DELAY: Duration = Duration::from_millis(1000);

/// String key-value persistence with `localStorage` semantics
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_preference(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

pub struct AppState<S> {
    store: S,
    keys: StorageKeys,
    token: Option<String>,
    theme: Theme,
}

impl<S: KeyValueStore> AppState<S> {
    /// Restore session and theme from `store`
    ///
    /// A missing or unreadable theme falls back to the environment's
    /// colour-scheme preference. The resolved theme is written back.
    pub fn init(store: S, keys: StorageKeys, prefers_dark: bool) -> Self {
        let token = read_or_log(&store, &keys.session);
        let theme = read_or_log(&store, &keys.theme)
            .and_then(|stored| stored.parse().ok())
            .unwrap_or_else(|| Theme::from_preference(prefers_dark));

        let state = Self {
            store,
            keys,
            token,
            theme,
        };
        state.persist_theme();
        debug!(
            "Session restored: signed_in={}, theme={}",
            state.is_signed_in(),
            state.theme
        );
        state
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Accepts any username with the mock password
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if password != MOCK_PASSWORD {
            debug!("Rejected sign-in for {:?}", username);
            return Err(AuthError::InvalidCredentials);
        }
        if let Err(e) = self.store.set_item(&self.keys.session, MOCK_TOKEN) {
            warn!("Session will not survive reload: {}", e);
        }
        self.token = Some(MOCK_TOKEN.to_string());
        info!("Signed in as {:?}", username);
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.store.remove_item(&self.keys.session) {
            warn!("Failed to clear stored session: {}", e);
        }
        self.token = None;
        info!("Signed out");
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.persist_theme();
        self.theme
    }

    fn persist_theme(&self) {
        if let Err(e) = self.store.set_item(&self.keys.theme, self.theme.as_str()) {
            warn!("Failed to persist theme: {}", e);
        }
    }
}

fn read_or_log<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    store.get_item(key).unwrap_or_else(|e| {
        warn!("Failed to read {}: {}", key, e);
        None
    })
}

/// Sign-in form state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip)]
    pub password: String,
    pub show_password: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Clears the previous error and marks the form busy
    pub fn begin_submit(&mut self) {
        self.error = None;
        self.submitting = true;
    }

    /// Check the credentials against `state` and settle the form
    pub fn finish_submit<S: KeyValueStore>(&mut self, state: &mut AppState<S>) -> bool {
        self.submitting = false;
        match state.login(&self.username, &self.password) {
            Ok(()) => true,
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Store whose every operation fails, like `localStorage` in a locked-down browser
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("denied".into()))
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("denied".into()))
        }
        fn remove_item(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("denied".into()))
        }
    }

    fn fresh(prefers_dark: bool) -> (MemoryStore, AppState<MemoryStore>) {
        let store = MemoryStore::new();
        let state = AppState::init(store.clone(), StorageKeys::default(), prefers_dark);
        (store, state)
    }

    #[test]
    fn test_login_with_mock_password() {
        let (store, mut state) = fresh(false);
        assert!(!state.is_signed_in());
        state.login("alice", "test123").unwrap();
        assert!(state.is_signed_in());
        assert_eq!(state.token(), Some(MOCK_TOKEN));
        assert_eq!(
            store.get_item("mock_jwt").unwrap().as_deref(),
            Some(MOCK_TOKEN)
        );
    }

    #[test]
    fn test_login_accepts_empty_username() {
        let (_, mut state) = fresh(false);
        assert!(state.login("", "test123").is_ok());
    }

    #[test]
    fn test_wrong_password_leaves_session_unset() {
        let (store, mut state) = fresh(false);
        for password in ["", "Test123", "test1234", " test123"] {
            assert_eq!(
                state.login("alice", password),
                Err(AuthError::InvalidCredentials)
            );
        }
        assert!(!state.is_signed_in());
        assert_eq!(store.get_item("mock_jwt").unwrap(), None);
    }

    #[test]
    fn test_session_survives_reload_until_logout() {
        let (store, mut state) = fresh(false);
        state.login("bob", "test123").unwrap();

        let mut reloaded = AppState::init(store.clone(), StorageKeys::default(), false);
        assert!(reloaded.is_signed_in());

        reloaded.logout();
        assert!(!reloaded.is_signed_in());
        let again = AppState::init(store, StorageKeys::default(), false);
        assert!(!again.is_signed_in());
    }

    #[test]
    fn test_theme_defaults_to_environment_preference() {
        assert_eq!(fresh(true).1.theme(), Theme::Dark);
        assert_eq!(fresh(false).1.theme(), Theme::Light);
    }

    #[test]
    fn test_stored_theme_wins_over_preference() {
        let store = MemoryStore::new();
        store.set_item("theme", "dark").unwrap();
        let state = AppState::init(store, StorageKeys::default(), false);
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_garbage_theme_falls_back() {
        let store = MemoryStore::new();
        store.set_item("theme", "sepia").unwrap();
        let state = AppState::init(store.clone(), StorageKeys::default(), true);
        assert_eq!(state.theme(), Theme::Dark);
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_theme_persists() {
        let (store, mut state) = fresh(false);
        assert_eq!(state.toggle_theme(), Theme::Dark);
        let reloaded = AppState::init(store, StorageKeys::default(), false);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_custom_storage_keys() {
        let store = MemoryStore::new();
        let keys = StorageKeys {
            session: "session".into(),
            theme: "ui-theme".into(),
        };
        let mut state = AppState::init(store.clone(), keys, false);
        state.login("x", "test123").unwrap();
        assert!(store.get_item("session").unwrap().is_some());
        assert_eq!(store.get_item("ui-theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_broken_store_degrades_to_memory() {
        let mut state = AppState::init(BrokenStore, StorageKeys::default(), true);
        assert_eq!(state.theme(), Theme::Dark);
        state.login("x", "test123").unwrap();
        assert!(state.is_signed_in());
        state.logout();
        assert!(!state.is_signed_in());
    }

    #[test]
    fn test_login_form_reports_inline_error() {
        let (_, mut state) = fresh(false);
        let mut form = LoginForm::new();
        form.username = "carol".into();
        form.password = "nope".into();
        form.begin_submit();
        assert!(form.submitting);
        assert!(!form.finish_submit(&mut state));
        assert!(!form.submitting);
        assert_eq!(
            form.error.as_deref(),
            Some("Invalid credentials. The correct password is \"test123\".")
        );

        form.password = "test123".into();
        form.begin_submit();
        assert_eq!(form.error, None);
        assert!(form.finish_submit(&mut state));
        assert!(state.is_signed_in());
    }

    #[test]
    fn test_login_form_never_serializes_password() {
        let mut form = LoginForm::new();
        form.password = "test123".into();
        let json = serde_json::to_string(&form).unwrap();
        assert!(!json.contains("test123"));
    }
}
