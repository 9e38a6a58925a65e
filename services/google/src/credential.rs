use std::fmt::{self, Debug};
use wif_core::time::{now, DateTime};
use wif_core::utils::Redact;
use wif_core::SigningCredential;

/// Token represents an OAuth2 access token with expiration.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Token {
    /// The access token.
    pub access_token: String,
    /// The expiration time of the token.
    pub expires_at: Option<DateTime>,
}

impl Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl SigningCredential for Token {
    fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }

        match self.expires_at {
            // Consider token invalid if it expires within 2 minutes
            Some(expires_at) => now() < expires_at - chrono::TimeDelta::minutes(2),
            None => true,
        }
    }
}
