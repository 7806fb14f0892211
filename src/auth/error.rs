/// Why an auth request did not go through
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Another sign-in request is still in progress")]
    RequestInFlight,
}

impl AuthFailure {
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        AuthFailure::Provider {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for AuthFailure {
    fn from(err: reqwest::Error) -> Self {
        AuthFailure::Network(err.to_string())
    }
}
