use crate::auth::error::AuthFailure;
use crate::auth::traits::{IdentityProvider, Subscription};
use crate::models::{Session, User};
use crate::supabase::SupabaseClient;
use async_trait::async_trait;
use reqwest::{Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl From<AuthUser> for User {
    fn from(user: AuthUser) -> Self {
        let name = ["name", "full_name"]
            .iter()
            .find_map(|key| user.user_metadata.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string);
        User {
            id: user.id,
            email: user.email.unwrap_or_default(),
            name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: AuthUser,
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            user: token.user.into(),
        }
    }
}

/// Sign-up answers with a session, or with only the user when the project
/// confirms email first
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    Pending(AuthUser),
}

/// Error body; the auth API has used several field names over time
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    error_code: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

fn map_error(status: u16, body: &str) -> AuthFailure {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let bad_credentials = matches!(parsed.error.as_deref(), Some("invalid_grant"))
        || matches!(parsed.error_code.as_deref(), Some("invalid_credentials"));
    if status == 400 && bad_credentials {
        return AuthFailure::InvalidCredentials;
    }

    let message = parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .unwrap_or_else(|| body.trim().to_string());
    AuthFailure::provider(status, message)
}

async fn read_success(response: Response) -> Result<String, AuthFailure> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        warn!("Auth API returned status: {}", status);
        Err(map_error(status.as_u16(), &body))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, AuthFailure> {
    serde_json::from_str(body)
        .map_err(|e| AuthFailure::provider(200, format!("Unexpected auth response: {}", e)))
}

/// Identity provider backed by the hosted auth API
pub struct SupabaseAuth {
    client: SupabaseClient,
    session: watch::Sender<Option<Session>>,
    authorize_url: Mutex<Option<Url>>,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            client,
            session,
            authorize_url: Mutex::new(None),
        }
    }

    /// Where the browser must go to continue the last OAuth request
    pub fn authorize_url(&self) -> Option<Url> {
        self.authorize_slot().clone()
    }

    /// Finish an OAuth flow with the tokens handed back on the redirect
    pub async fn complete_oauth(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), AuthFailure> {
        let url = self.auth_endpoint("auth/v1/user")?;
        let response = self
            .client
            .request(Method::GET, url, Some(access_token))
            .send()
            .await?;
        let user: AuthUser = decode(&read_success(response).await?)?;

        self.authorize_slot().take();
        self.publish(Some(Session {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.map(str::to_string),
            user: user.into(),
        }));
        Ok(())
    }

    fn build_authorize_url(&self, provider: &str, redirect_to: &str) -> Result<Url, AuthFailure> {
        let mut url = self.auth_endpoint("auth/v1/authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", redirect_to);
        Ok(url)
    }

    fn auth_endpoint(&self, path: &str) -> Result<Url, AuthFailure> {
        self.client
            .endpoint(path)
            .map_err(|e| AuthFailure::provider(0, e.to_string()))
    }

    fn authorize_slot(&self) -> MutexGuard<'_, Option<Url>> {
        self.authorize_url.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, session: Option<Session>) {
        self.session.send_replace(session);
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn on_session_change(&self) -> Subscription {
        Subscription::new(self.session.subscribe())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthFailure> {
        let mut url = self.auth_endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        debug!("Password sign-in for {}", email);
        let response = self
            .client
            .request(Method::POST, url, None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = decode(&read_success(response).await?)?;
        info!("✅ Signed in {}", email);
        self.publish(Some(token.into()));
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<(), AuthFailure> {
        let url = self.auth_endpoint("auth/v1/signup")?;

        let response = self
            .client
            .request(Method::POST, url, None)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "name": display_name }
            }))
            .send()
            .await?;

        let body = read_success(response).await?;
        match decode::<SignUpResponse>(&body)? {
            SignUpResponse::Session(token) => {
                info!("✅ Registered and signed in {}", email);
                self.publish(Some(token.into()));
            }
            SignUpResponse::Pending(user) => {
                info!("Registered {} ({}), awaiting email confirmation", email, user.id)
            }
        }
        Ok(())
    }

    async fn sign_in_with_oauth(&self, provider: &str, redirect_to: &str) -> Result<(), AuthFailure> {
        if provider.trim().is_empty() {
            return Err(AuthFailure::provider(400, "Missing OAuth provider"));
        }

        let url = self.build_authorize_url(provider, redirect_to)?;
        info!("Continue {} sign-in at {}", provider, url);
        *self.authorize_slot() = Some(url);
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthFailure> {
        let token = self
            .session
            .borrow()
            .as_ref()
            .map(|session| session.access_token.clone());
        let Some(token) = token else {
            return Ok(());
        };

        // The local copy goes regardless of what the server says
        self.publish(None);

        let url = self.auth_endpoint("auth/v1/logout")?;
        let response = self
            .client
            .request(Method::POST, url, Some(&token))
            .send()
            .await?;
        read_success(response).await?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "Supabase"
    }
}
