use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Default OAuth2 scope for Google Cloud services
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
pub const DEFAULT_TOKEN_URL: &str = "https://sts.googleapis.com/v1/token";

// OAuth 2.0 token exchange, see RFC 8693.
pub const GRANT_TYPE_TOKEN_EXCHANGE: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
pub const TOKEN_TYPE_ACCESS_TOKEN: &str = "urn:ietf:params:oauth:token-type:access_token";
pub const TOKEN_TYPE_AWS4_REQUEST: &str = "urn:ietf:params:aws:token-type:aws4_request";

// Headers used in the AWS subject token.
pub const X_GOOG_CLOUD_TARGET_RESOURCE: &str = "x-goog-cloud-target-resource";

/// The maximum impersonated token lifetime allowed, 1 hour.
pub const MAX_IMPERSONATION_LIFETIME_SECONDS: u64 = 3600;

/// AsciiSet for the serialized subject token.
///
/// Encode every byte except the unreserved characters and '/'.
pub static SUBJECT_TOKEN_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
