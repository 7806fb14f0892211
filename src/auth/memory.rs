use crate::auth::error::AuthFailure;
use crate::auth::traits::{IdentityProvider, Subscription};
use crate::models::{Session, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, info};

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    password: String,
    user: User,
}

/// In-process identity provider with accounts kept in memory
///
/// Used when no backend is configured and by tests. Sign-ups are confirmed
/// immediately and OAuth flows wait for [`MemoryIdentity::complete_oauth`].
pub struct MemoryIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    pending_oauth: Mutex<Option<String>>,
    session: watch::Sender<Option<Session>>,
    reachable: AtomicBool,
    next_id: AtomicU64,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            pending_oauth: Mutex::new(None),
            session,
            reachable: AtomicBool::new(true),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seed an account without going through sign-up
    pub fn with_account(self, email: &str, password: &str, name: &str) -> Self {
        let user = self.new_user(email, Some(name));
        self.accounts().insert(
            email.to_lowercase(),
            Account {
                password: password.to_string(),
                user,
            },
        );
        self
    }

    /// Simulate losing the connection to the provider
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// OAuth provider name awaiting its callback
    pub fn pending_oauth(&self) -> Option<String> {
        self.pending_oauth_slot().clone()
    }

    /// Finish a pending OAuth flow as the given user
    pub fn complete_oauth(&self, email: &str, name: &str) -> Result<(), AuthFailure> {
        let provider = self
            .pending_oauth_slot()
            .take()
            .ok_or_else(|| AuthFailure::provider(400, "No OAuth flow in progress"))?;
        debug!("Completing {} OAuth callback for {}", provider, email);
        let user = self.new_user(email, Some(name));
        self.publish(Some(self.issue(user)));
        Ok(())
    }

    /// Drop the session on the provider side, as an expired token would
    pub fn revoke(&self) {
        self.publish(None);
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<String, Account>> {
        self.accounts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn pending_oauth_slot(&self) -> MutexGuard<'_, Option<String>> {
        self.pending_oauth.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_reachable(&self) -> Result<(), AuthFailure> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AuthFailure::Network("identity provider unreachable".to_string()))
        }
    }

    fn new_user(&self, email: &str, name: Option<&str>) -> User {
        User {
            id: format!("user-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            email: email.to_string(),
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
        }
    }

    fn issue(&self, user: User) -> Session {
        Session {
            access_token: format!("mem-token-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            refresh_token: None,
            user,
        }
    }

    fn publish(&self, session: Option<Session>) {
        self.session.send_replace(session);
    }
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn on_session_change(&self) -> Subscription {
        Subscription::new(self.session.subscribe())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthFailure> {
        self.check_reachable()?;

        let user = {
            let accounts = self.accounts();
            match accounts.get(&email.to_lowercase()) {
                Some(account) if account.password == password => account.user.clone(),
                _ => return Err(AuthFailure::InvalidCredentials),
            }
        };

        info!("Password sign-in for {}", email);
        self.publish(Some(self.issue(user)));
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<(), AuthFailure> {
        self.check_reachable()?;

        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthFailure::provider(
                422,
                format!("Password should be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        let user = {
            let mut accounts = self.accounts();
            let key = email.to_lowercase();
            if accounts.contains_key(&key) {
                return Err(AuthFailure::provider(422, "User already registered"));
            }
            let user = self.new_user(email, Some(display_name));
            accounts.insert(
                key,
                Account {
                    password: password.to_string(),
                    user: user.clone(),
                },
            );
            user
        };

        info!("Registered {}", email);
        self.publish(Some(self.issue(user)));
        Ok(())
    }

    async fn sign_in_with_oauth(&self, provider: &str, redirect_to: &str) -> Result<(), AuthFailure> {
        self.check_reachable()?;

        if provider.trim().is_empty() {
            return Err(AuthFailure::provider(400, "Missing OAuth provider"));
        }

        debug!("Starting {} OAuth flow, redirecting to {}", provider, redirect_to);
        *self.pending_oauth_slot() = Some(provider.to_string());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthFailure> {
        self.check_reachable()?;
        self.publish(None);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "Memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_checks_password() {
        let identity = MemoryIdentity::new().with_account("amal@example.com", "secret1", "Amal");

        assert_eq!(
            identity.sign_in_with_password("amal@example.com", "wrong").await,
            Err(AuthFailure::InvalidCredentials)
        );
        assert!(identity.current_session().await.is_none());

        identity
            .sign_in_with_password("Amal@Example.com", "secret1")
            .await
            .unwrap();
        let session = identity.current_session().await.unwrap();
        assert_eq!(session.user.name.as_deref(), Some("Amal"));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicates_and_short_passwords() {
        let identity = MemoryIdentity::new();
        assert!(matches!(
            identity.sign_up("a@example.com", "123", "A").await,
            Err(AuthFailure::Provider { status: 422, .. })
        ));

        identity.sign_up("a@example.com", "123456", "A").await.unwrap();
        assert!(matches!(
            identity.sign_up("a@example.com", "abcdef", "A").await,
            Err(AuthFailure::Provider { status: 422, .. })
        ));
    }

    #[tokio::test]
    async fn test_subscription_sees_changes() {
        let identity = MemoryIdentity::new().with_account("a@example.com", "123456", "A");
        let mut subscription = identity.on_session_change();
        assert_eq!(subscription.poll_change(), None);

        identity.sign_in_with_password("a@example.com", "123456").await.unwrap();
        let change = subscription.poll_change().unwrap();
        assert_eq!(change.unwrap().user.email, "a@example.com");
        assert_eq!(subscription.poll_change(), None);

        identity.revoke();
        assert_eq!(subscription.next_change().await, Some(None));
    }

    #[tokio::test]
    async fn test_oauth_waits_for_callback() {
        let identity = MemoryIdentity::new();
        assert!(identity.complete_oauth("x@example.com", "X").is_err());

        identity
            .sign_in_with_oauth("google", "http://localhost:3000")
            .await
            .unwrap();
        assert_eq!(identity.pending_oauth().as_deref(), Some("google"));
        assert!(identity.current_session().await.is_none());

        identity.complete_oauth("x@example.com", "X").unwrap();
        assert!(identity.current_session().await.is_some());
        assert_eq!(identity.pending_oauth(), None);
    }

    #[tokio::test]
    async fn test_unreachable_provider_fails_with_network_error() {
        let identity = MemoryIdentity::new();
        identity.set_reachable(false);
        assert!(matches!(
            identity.sign_out().await,
            Err(AuthFailure::Network(_))
        ));
    }
}
