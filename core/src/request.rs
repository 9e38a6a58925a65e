use std::mem;

use http::header::HeaderValue;
use http::uri::{Authority, PathAndQuery, Scheme};
use http::{HeaderMap, Method, Uri};

use crate::{Error, Result};

/// SigningRequest is the editable view of a request while it is being signed.
///
/// [`SigningRequest::build`] moves the headers out of the request parts and
/// splits the uri. Signers edit the fields, then [`SigningRequest::apply`]
/// writes everything back.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme, `http` if the uri has none.
    pub scheme: Scheme,
    /// Host and port.
    pub authority: Authority,
    /// Path, `/` if the uri has none.
    pub path: String,
    /// Decoded query pairs in their original order.
    pub query: Vec<(String, String)>,
    /// Headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Split `parts` into a signing request.
    ///
    /// Requests without authority can't be signed.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let Some(authority) = uri.authority else {
            return Err(Error::request_invalid(
                "request without authority is invalid for signing",
            ));
        };
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        let query = form_urlencoded::parse(paq.query().unwrap_or_default().as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority,
            path: paq.path().to_string(),
            query,
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Write the signing request back into `parts`.
    ///
    /// Query pairs are written verbatim, so signers must encode them first.
    pub fn apply(self, parts: &mut http::request::Parts) -> Result<()> {
        let mut paq = self.path;
        for (i, (k, v)) in self.query.iter().enumerate() {
            paq.push(if i == 0 { '?' } else { '&' });
            paq.push_str(k);
            if !v.is_empty() {
                paq.push('=');
                paq.push_str(v);
            }
        }

        parts.headers = self.headers;
        parts.method = self.method;
        parts.uri = Uri::builder()
            .scheme(self.scheme)
            .authority(self.authority)
            .path_and_query(paq)
            .build()?;
        Ok(())
    }

    /// Trim leading and trailing spaces of a header value.
    pub fn header_value_normalize(v: &mut HeaderValue) {
        let trimmed = v.as_bytes().trim_ascii();
        if trimmed.len() != v.len() {
            if let Ok(value) = HeaderValue::from_bytes(trimmed) {
                *v = value;
            }
        }
    }

    /// Lowercase header names in ascending order.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.headers.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}
