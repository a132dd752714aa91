//! Two-screen navigation behind the sign-in gate

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "page", content = "id", rename_all = "snake_case")]
pub enum Route {
    #[default]
    Dashboard,
    ContractDetail(String),
}

/// What is actually on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "id", rename_all = "snake_case")]
pub enum Screen {
    Login,
    Dashboard,
    ContractDetail(String),
}

#[derive(Debug, Clone)]
pub struct Shell {
    route: Route,
    sidebar_open: bool,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self {
            route: Route::Dashboard,
            sidebar_open: true,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Signed-out users always see the login screen, whatever the route
    pub fn screen(&self, signed_in: bool) -> Screen {
        if !signed_in {
            return Screen::Login;
        }
        match &self.route {
            Route::Dashboard => Screen::Dashboard,
            Route::ContractDetail(id) => Screen::ContractDetail(id.clone()),
        }
    }

    pub fn navigate_to_contract(&mut self, id: &str) {
        self.route = Route::ContractDetail(id.to_string());
    }

    pub fn navigate_to_dashboard(&mut self) {
        self.route = Route::Dashboard;
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }
}
