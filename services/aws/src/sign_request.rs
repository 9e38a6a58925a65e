use crate::constants::{
    AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE,
    X_AMZ_SECURITY_TOKEN,
};
use crate::Credential;
use async_trait::async_trait;
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::fmt::{self, Display, Write};
use std::time::Duration;
use wif_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use wif_core::time::{format_date, format_iso8601, now, DateTime};
use wif_core::{Context, Error, Result, SignRequest, SigningRequest};

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// RequestSigner signs requests with AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// If the request carries no `x-amz-content-sha256` header, the payload is
/// signed as `UNSIGNED-PAYLOAD`. Services other than S3 require the real
/// payload hash, so callers should set the header themselves.
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a signer for `service` in `region`.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Sign at `time` instead of now.
    ///
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

/// Credential scope of a signature, `<date>/<region>/<service>/aws4_request`.
struct Scope<'a> {
    time: DateTime,
    region: &'a str,
    service: &'a str,
}

impl Scope<'_> {
    fn signing_key(&self, secret: &str) -> Vec<u8> {
        let date_key = hmac_sha256(
            format!("AWS4{secret}").as_bytes(),
            format_date(self.time).as_bytes(),
        );
        [self.region, self.service, "aws4_request"]
            .iter()
            .fold(date_key, |key, part| hmac_sha256(&key, part.as_bytes()))
    }

    fn string_to_sign(&self, canonical_request: &str) -> String {
        format!(
            "{ALGORITHM}\n{}\n{}\n{}",
            format_iso8601(self.time),
            self,
            hex_sha256(canonical_request.as_bytes())
        )
    }
}

impl Display for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/aws4_request",
            format_date(self.time),
            self.region,
            self.service
        )
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if expires_in.is_some() {
            return Err(Error::request_invalid("SigV4 signer only supports header signing"));
        }

        let scope = Scope {
            time: self.time.unwrap_or_else(now),
            region: &self.region,
            service: &self.service,
        };
        let mut signing = SigningRequest::build(req)?;

        let Some(cred) = credential else {
            // Nothing to sign with, hand the request back untouched.
            return signing.apply(req);
        };

        for (_, value) in signing.headers.iter_mut() {
            SigningRequest::header_value_normalize(value)
        }
        if !signing.headers.contains_key(header::HOST) {
            let host = signing.authority.as_str().parse()?;
            signing.headers.insert(header::HOST, host);
        }

        add_signing_headers(&mut signing, cred, scope.time)?;
        signing.query.sort();
        for (k, v) in signing.query.iter_mut() {
            *k = utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string();
            *v = utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string();
        }

        let string_to_sign = scope.string_to_sign(&canonical_request(&signing)?);
        debug!("calculated string to sign: {string_to_sign}");
        let signature = hex_hmac_sha256(
            &scope.signing_key(&cred.secret_access_key),
            string_to_sign.as_bytes(),
        );

        let mut authorization = HeaderValue::from_str(&format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
            cred.access_key_id,
            signing.header_name_to_vec_sorted().join(";"),
        ))
        .map_err(|e| Error::unexpected("failed to create authorization header").with_source(e))?;
        authorization.set_sensitive(true);
        signing.headers.insert(header::AUTHORIZATION, authorization);

        signing.apply(req)
    }
}

/// Build the canonical request of an already normalized signing request.
fn canonical_request(req: &SigningRequest) -> Result<String> {
    let path = percent_decode_str(&req.path)
        .decode_utf8()
        .map_err(|e| Error::request_invalid("failed to decode path").with_source(e))?;

    let mut f = String::new();
    writeln!(f, "{}", req.method)?;
    writeln!(f, "{}", utf8_percent_encode(&path, &AWS_URI_ENCODE_SET))?;

    let query = req
        .query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>();
    writeln!(f, "{}", query.join("&"))?;

    let signed_headers = req.header_name_to_vec_sorted();
    for name in &signed_headers {
        writeln!(f, "{name}:{}", req.headers[*name].to_str()?)?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;

    match req.headers.get(X_AMZ_CONTENT_SHA_256) {
        Some(v) => f.push_str(v.to_str()?),
        None => f.push_str(UNSIGNED_PAYLOAD),
    }
    Ok(f)
}

/// Headers carried by a request signed in the `Authorization` header.
fn add_signing_headers(req: &mut SigningRequest, cred: &Credential, time: DateTime) -> Result<()> {
    if !req.headers.contains_key(X_AMZ_DATE) {
        req.headers
            .insert(X_AMZ_DATE, HeaderValue::try_from(format_iso8601(time))?);
    }
    if !req.headers.contains_key(X_AMZ_CONTENT_SHA_256) {
        req.headers.insert(
            X_AMZ_CONTENT_SHA_256,
            HeaderValue::from_static(UNSIGNED_PAYLOAD),
        );
    }

    if let Some(token) = &cred.session_token {
        let mut value = HeaderValue::from_str(token).map_err(|e| {
            Error::credential_invalid("session token is not a valid header value").with_source(e)
        })?;
        value.set_sensitive(true);
        req.headers.insert(X_AMZ_SECURITY_TOKEN, value);
    }
    Ok(())
}
