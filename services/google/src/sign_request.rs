use http::header;
use log::debug;
use std::time::Duration;
use wif_core::{Context, Error, Result, SignRequest, SigningCredential, SigningRequest};

use crate::credential::Token;

/// RequestSigner authenticates Google API requests with a bearer token.
#[derive(Debug, Default)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a new RequestSigner.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Token;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "bearer token authentication doesn't support query signing",
            ));
        }

        let token = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        if !token.is_valid() {
            return Err(Error::credential_invalid("token is empty or expired"));
        }

        let mut signing_req = SigningRequest::build(req)?;
        signing_req.headers.insert(header::AUTHORIZATION, {
            let mut value: http::HeaderValue = format!("Bearer {}", &token.access_token)
                .parse()
                .map_err(|e| {
                    Error::credential_invalid("access token is not a valid header value")
                        .with_source(e)
                })?;
            value.set_sensitive(true);
            value
        });
        debug!("signed request to {} with bearer token", signing_req.authority);

        signing_req.apply(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use wif_core::time::now;
    use wif_core::ErrorKind;

    fn parts() -> http::request::Parts {
        http::Request::get("https://cloudresourcemanager.googleapis.com/v1/projects")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_sign_with_token() {
        let mut parts = parts();
        let token = Token {
            access_token: "ya29.federated".to_string(),
            expires_at: Some(now() + TimeDelta::hours(1)),
        };

        RequestSigner::new()
            .sign_request(&Context::new(), &mut parts, Some(&token), None)
            .await
            .expect("sign must succeed");

        assert_eq!(parts.headers[header::AUTHORIZATION], "Bearer ya29.federated");
        assert!(parts.headers[header::AUTHORIZATION].is_sensitive());
        assert_eq!(
            parts.uri.to_string(),
            "https://cloudresourcemanager.googleapis.com/v1/projects"
        );
    }

    #[tokio::test]
    async fn test_sign_rejects_invalid_input() {
        let expired = Token {
            access_token: "ya29.federated".to_string(),
            expires_at: Some(now() - TimeDelta::minutes(1)),
        };

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut parts(), Some(&expired), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut parts(), None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);

        let err = RequestSigner::new()
            .sign_request(
                &Context::new(),
                &mut parts(),
                Some(&Token {
                    access_token: "ya29.federated".to_string(),
                    expires_at: None,
                }),
                Some(Duration::from_secs(60)),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
