use crate::auth::error::AuthFailure;
use crate::models::Session;
use async_trait::async_trait;
use tokio::sync::watch;

/// Handle on a provider's session-change notifications
///
/// Dropping or cancelling the handle stops delivery.
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<Option<Session>>,
}

impl Subscription {
    pub fn new(receiver: watch::Receiver<Option<Session>>) -> Self {
        Self { receiver }
    }

    /// Latest session if it changed since the last call
    pub fn poll_change(&mut self) -> Option<Option<Session>> {
        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            _ => None,
        }
    }

    /// Wait for the next change; `None` once the provider is gone
    pub async fn next_change(&mut self) -> Option<Option<Session>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    pub fn cancel(self) {}
}

/// Boundary to the external identity service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Session the provider currently holds, if any
    async fn current_session(&self) -> Option<Session>;

    /// Subscribe to session changes
    fn on_session_change(&self) -> Subscription;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthFailure>;

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<(), AuthFailure>;

    /// Start an OAuth flow; the session arrives later through a notification
    async fn sign_in_with_oauth(&self, provider: &str, redirect_to: &str) -> Result<(), AuthFailure>;

    async fn sign_out(&self) -> Result<(), AuthFailure>;

    /// Shown in log lines, e.g. "Memory"
    fn provider_name(&self) -> &'static str;
}
