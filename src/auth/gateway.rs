//! Auth gateway - turns page intents into identity provider calls
//!
//! Requests never overlap: the view's in-flight flag is taken before the
//! provider is called and released when the request ends, including when the
//! caller drops the future mid-call. Sessions reach the view only through the
//! provider's change notifications (see [`AuthGateway::sync`]).

use crate::auth::error::AuthFailure;
use crate::auth::traits::{IdentityProvider, Subscription};
use crate::view::ViewController;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{info, warn};

/// Holds the view's in-flight flag for one provider call
struct InFlight<'a> {
    view: &'a mut ViewController,
}

impl<'a> InFlight<'a> {
    fn begin(view: &'a mut ViewController) -> Result<Self, AuthFailure> {
        view.begin_auth_request()?;
        Ok(Self { view })
    }
}

impl Deref for InFlight<'_> {
    type Target = ViewController;

    fn deref(&self) -> &ViewController {
        self.view
    }
}

impl DerefMut for InFlight<'_> {
    fn deref_mut(&mut self) -> &mut ViewController {
        self.view
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.view.finish_auth_request();
    }
}

pub struct AuthGateway {
    provider: Arc<dyn IdentityProvider>,
    subscription: Option<Subscription>,
    redirect_to: String,
}

impl AuthGateway {
    /// Subscribe to the provider's session changes
    pub fn new(provider: Arc<dyn IdentityProvider>, redirect_to: impl Into<String>) -> Self {
        let subscription = Some(provider.on_session_change());
        Self {
            provider,
            subscription,
            redirect_to: redirect_to.into(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Initial session lookup at startup
    pub async fn restore(&mut self, view: &mut ViewController) {
        let session = self.provider.current_session().await;
        if let Some(session) = &session {
            info!("Restored session for {}", session.user.email);
        }
        view.set_session(session);
        self.sync(view);
    }

    pub async fn login(
        &mut self,
        view: &mut ViewController,
        email: &str,
        password: &str,
    ) -> Result<(), AuthFailure> {
        let mut request = InFlight::begin(view)?;
        let result = self.provider.sign_in_with_password(email, password).await;
        self.settle(&mut request, "Login", result)
    }

    pub async fn register(
        &mut self,
        view: &mut ViewController,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<(), AuthFailure> {
        let mut request = InFlight::begin(view)?;
        let result = self.provider.sign_up(email, password, display_name).await;
        self.settle(&mut request, "Registration", result)
    }

    /// Start an OAuth flow; the session follows once the provider calls back
    pub async fn login_with_oauth(
        &mut self,
        view: &mut ViewController,
        provider: &str,
    ) -> Result<(), AuthFailure> {
        let mut request = InFlight::begin(view)?;
        let result = self
            .provider
            .sign_in_with_oauth(provider, &self.redirect_to)
            .await;
        self.settle(&mut request, "OAuth login", result)
    }

    /// Sign out. The view always drops its session, even when another
    /// request is pending; an error means the provider may still consider
    /// the user signed in.
    pub async fn logout(&mut self, view: &mut ViewController) -> Result<(), AuthFailure> {
        if view.state().auth_in_flight {
            view.set_session(None);
            warn!("Logout refused while another request is pending; local session cleared");
            return Err(AuthFailure::RequestInFlight);
        }

        let mut request = InFlight::begin(view)?;
        let result = self.provider.sign_out().await;

        self.sync(&mut request);
        request.set_session(None);
        drop(request);

        if let Err(err) = &result {
            warn!("Logout failed, provider session may persist: {}", err);
        }
        result
    }

    /// Apply any session change the provider has published. Returns whether
    /// the view was updated.
    pub fn sync(&mut self, view: &mut ViewController) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        match subscription.poll_change() {
            Some(session) => {
                view.set_session(session);
                true
            }
            None => false,
        }
    }

    /// Wait for the provider's next session change and apply it. Returns
    /// false once the subscription is gone.
    pub async fn next_change(&mut self, view: &mut ViewController) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        match subscription.next_change().await {
            Some(session) => {
                view.set_session(session);
                true
            }
            None => false,
        }
    }

    /// Stop listening for session changes
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
            info!("Stopped listening to {} session changes", self.provider_name());
        }
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    fn settle(
        &mut self,
        view: &mut ViewController,
        action: &str,
        result: Result<(), AuthFailure>,
    ) -> Result<(), AuthFailure> {
        match result {
            Ok(()) => {
                self.sync(view);
                view.close_auth_modal();
                Ok(())
            }
            Err(err) => {
                warn!("{} failed: {}", action, err);
                Err(err)
            }
        }
    }
}
