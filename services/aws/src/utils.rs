use http::StatusCode;
use wif_core::Error;

/// Get the regional sts endpoint.
///
/// The returning format may look like `sts.{region}.amazonaws.com`.
///
/// AWS China regions live under a different top level domain, we can
/// check them by region name.
///
/// ref: <https://github.com/awslabs/aws-sdk-rust/blob/31cfae2cf23be0c68a47357070dea1aee9227e3a/sdk/sts/src/aws_endpoint.rs>
pub fn sts_endpoint(region: &str) -> String {
    if region.starts_with("cn-") {
        format!("sts.{region}.amazonaws.com.cn")
    } else {
        format!("sts.{region}.amazonaws.com")
    }
}

/// Turn a non-200 IMDS response into an error.
///
/// IMDS returns plain text bodies, so only the status code tells us what went wrong.
pub(crate) fn parse_imds_error(operation: &str, status: StatusCode, body: &str) -> Error {
    let err = match status {
        StatusCode::UNAUTHORIZED => {
            Error::credential_invalid(format!("IMDS token rejected during {operation}"))
                .with_context("hint: the IMDSv2 session token may have expired")
        }
        StatusCode::FORBIDDEN => {
            Error::permission_denied(format!("IMDS denied access during {operation}"))
                .with_context("hint: check if IMDS access is allowed for this instance")
        }
        StatusCode::NOT_FOUND => {
            Error::config_invalid(format!("IMDS resource not found during {operation}"))
                .with_context("hint: check if an IAM role is attached to this instance")
        }
        s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
            Error::unexpected(format!("IMDS unavailable during {operation}")).set_retryable(true)
        }
        _ => Error::unexpected(format!("IMDS request failed during {operation}")),
    };

    err.with_context(format!("status: {status}"))
        .with_context(format!("body: {body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use wif_core::ErrorKind;

    #[test_case("us-east-1", "sts.us-east-1.amazonaws.com" ; "us east")]
    #[test_case("eu-west-1", "sts.eu-west-1.amazonaws.com" ; "eu west")]
    #[test_case("cn-north-1", "sts.cn-north-1.amazonaws.com.cn" ; "china")]
    fn test_sts_endpoint(region: &str, expected: &str) {
        assert_eq!(sts_endpoint(region), expected);
    }

    #[test_case(StatusCode::UNAUTHORIZED, ErrorKind::CredentialInvalid, false ; "unauthorized")]
    #[test_case(StatusCode::FORBIDDEN, ErrorKind::PermissionDenied, false ; "forbidden")]
    #[test_case(StatusCode::NOT_FOUND, ErrorKind::ConfigInvalid, false ; "not found")]
    #[test_case(StatusCode::SERVICE_UNAVAILABLE, ErrorKind::Unexpected, true ; "unavailable")]
    #[test_case(StatusCode::BAD_REQUEST, ErrorKind::Unexpected, false ; "bad request")]
    fn test_parse_imds_error(status: StatusCode, kind: ErrorKind, retryable: bool) {
        let err = parse_imds_error("fetch_credentials", status, "oops");
        assert_eq!(err.kind(), kind);
        assert_eq!(err.is_retryable(), retryable);
        assert!(err.context().iter().any(|c| c == "body: oops"));
    }
}
