pub mod controller;
pub mod state;

pub use controller::{FavoriteOutcome, ViewController, ViewEffect, DEFAULT_SCROLL_THRESHOLD};
pub use state::{AuthForm, AuthModal, ViewState};
