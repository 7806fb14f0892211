//! View state - everything the page renders, owned by the controller

use crate::filter::FilterCriteria;
use crate::models::Session;
use std::collections::BTreeSet;

/// Which form the auth modal shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthForm {
    #[default]
    SignIn,
    Register,
}

impl AuthForm {
    pub fn heading(&self) -> &'static str {
        match self {
            AuthForm::SignIn => "Welcome Back",
            AuthForm::Register => "Join Dubai Elite",
        }
    }

    pub fn toggled(&self) -> AuthForm {
        match self {
            AuthForm::SignIn => AuthForm::Register,
            AuthForm::Register => AuthForm::SignIn,
        }
    }
}

/// Auth modal visibility: closed, or open on one of its forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthModal {
    #[default]
    Closed,
    Open(AuthForm),
}

impl AuthModal {
    pub fn is_open(&self) -> bool {
        matches!(self, AuthModal::Open(_))
    }
}

/// Snapshot of the page state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Free-text query as typed
    pub query: String,
    /// Filter panel selections
    pub criteria: FilterCriteria,
    pub favorites: BTreeSet<String>,
    pub session: Option<Session>,
    pub auth_modal: AuthModal,
    pub filter_panel_open: bool,
    /// Vertical scroll position in pixels
    pub scroll_offset: u32,
    /// Scroll-to-top button shown once the offset passes the threshold
    pub show_scroll_top: bool,
    /// A login, register, OAuth or logout request is awaiting the provider
    pub auth_in_flight: bool,
}

impl ViewState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
