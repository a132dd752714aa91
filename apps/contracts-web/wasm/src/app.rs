//! Session, theme and navigation for the page shell

use crate::storage::LocalStorage;
use crate::timers::sleep;
use crate::{parse_config, prefers_dark_scheme, to_json};
use dashboard_core::session::LOGIN_DELAY;
use dashboard_core::{AppState, LoginForm, Shell, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

struct AppInner {
    state: AppState<LocalStorage>,
    login: LoginForm,
    shell: Shell,
}

/// Top-level app handle: sign-in gate, theme switch and the two routes
#[wasm_bindgen]
pub struct WasmApp {
    inner: Rc<RefCell<AppInner>>,
}

#[wasm_bindgen]
impl WasmApp {
    /// Restore the stored session and theme and apply the theme class
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmApp, JsValue> {
        let config = parse_config(config_json)?;
        let state = AppState::init(LocalStorage::new(), config.storage, prefers_dark_scheme());
        apply_theme_class(state.theme());
        Ok(WasmApp {
            inner: Rc::new(RefCell::new(AppInner {
                state,
                login: LoginForm::new(),
                shell: Shell::new(),
            })),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn signed_in(&self) -> bool {
        self.inner.borrow().state.is_signed_in()
    }

    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.inner.borrow().state.theme().to_string()
    }

    /// Flip light/dark, persist it and update the root element
    #[wasm_bindgen]
    pub fn toggle_theme(&self) -> String {
        let theme = self.inner.borrow_mut().state.toggle_theme();
        apply_theme_class(theme);
        theme.to_string()
    }

    #[wasm_bindgen]
    pub fn set_username(&self, username: &str) {
        self.inner.borrow_mut().login.username = username.to_string();
    }

    #[wasm_bindgen]
    pub fn set_password(&self, password: &str) {
        self.inner.borrow_mut().login.password = password.to_string();
    }

    #[wasm_bindgen]
    pub fn toggle_password_visibility(&self) {
        self.inner.borrow_mut().login.toggle_password_visibility();
    }

    /// Submit the sign-in form after the mock network delay
    ///
    /// Resolves to whether the user is now signed in; on failure the inline
    /// error is available from `login_form_json`.
    #[wasm_bindgen]
    pub async fn submit_login(&self) -> Result<bool, JsValue> {
        self.inner.borrow_mut().login.begin_submit();
        sleep(LOGIN_DELAY).await?;

        let mut inner = self.inner.borrow_mut();
        let AppInner { state, login, .. } = &mut *inner;
        let ok = login.finish_submit(state);
        if ok {
            *login = LoginForm::new();
            web_sys::console::log_1(&"Signed in".into());
        }
        Ok(ok)
    }

    #[wasm_bindgen]
    pub fn logout(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.state.logout();
        inner.shell.navigate_to_dashboard();
    }

    #[wasm_bindgen]
    pub fn login_form_json(&self) -> Result<String, JsValue> {
        to_json(&self.inner.borrow().login)
    }

    #[wasm_bindgen]
    pub fn navigate_to_contract(&self, id: &str) {
        self.inner.borrow_mut().shell.navigate_to_contract(id);
    }

    #[wasm_bindgen]
    pub fn navigate_to_dashboard(&self) {
        self.inner.borrow_mut().shell.navigate_to_dashboard();
    }

    #[wasm_bindgen]
    pub fn toggle_sidebar(&self) {
        self.inner.borrow_mut().shell.toggle_sidebar();
    }

    #[wasm_bindgen]
    pub fn close_sidebar(&self) {
        self.inner.borrow_mut().shell.close_sidebar();
    }

    #[wasm_bindgen(getter)]
    pub fn sidebar_open(&self) -> bool {
        self.inner.borrow().shell.is_sidebar_open()
    }

    /// Which screen to render: `{"screen":"login"}`, `{"screen":"dashboard"}`
    /// or `{"screen":"contract_detail","id":"..."}`
    #[wasm_bindgen]
    pub fn screen_json(&self) -> Result<String, JsValue> {
        let inner = self.inner.borrow();
        to_json(&inner.shell.screen(inner.state.is_signed_in()))
    }
}

/// Put `light` or `dark` on `<html>` for the stylesheet
fn apply_theme_class(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let classes = root.class_list();
    let _ = classes.remove_2(Theme::Light.as_str(), Theme::Dark.as_str());
    let _ = classes.add_1(theme.as_str());
}
