//! Mapping of AWS SDK failures onto [`ProviderError`].

use aws_sdk_elasticloadbalancingv2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::error::ProviderError;

/// Service error codes AWS returns for missing, expired or invalid credentials.
const CREDENTIAL_ERROR_CODES: &[&str] = &[
    "AuthFailure",
    "ExpiredToken",
    "ExpiredTokenException",
    "InvalidAccessKeyId",
    "InvalidClientTokenId",
    "MissingAuthenticationToken",
    "SignatureDoesNotMatch",
    "UnrecognizedClientException",
];

/// Converts an SDK error into a provider error for the named operation.
pub(crate) fn from_sdk_error<E, R>(operation: &str, err: &SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = service_error_code(err).map(String::from);
    let message = DisplayErrorContext(err).to_string();
    classify(operation, code, message)
}

/// Returns the service error code, if the failure came from the service.
fn service_error_code<E, R>(err: &SdkError<E, R>) -> Option<&str>
where
    E: ProvideErrorMetadata,
{
    err.as_service_error().and_then(ProvideErrorMetadata::code)
}

/// Sorts a failure into the credentials bucket or the catch-all API bucket.
///
/// Credential problems surface either as a service code (the request was
/// signed but rejected) or as a client-side failure before dispatch, whose
/// rendered chain mentions the credentials provider.
pub(crate) fn classify(operation: &str, code: Option<String>, message: String) -> ProviderError {
    let rejected = code
        .as_deref()
        .is_some_and(|c| CREDENTIAL_ERROR_CODES.contains(&c));
    let unresolved = code.is_none() && message.to_ascii_lowercase().contains("credential");

    if rejected || unresolved {
        ProviderError::credentials(operation, message)
    } else {
        ProviderError::api(operation, code, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_token_is_credentials() {
        let err = classify(
            "DescribeLoadBalancers",
            Some(String::from("InvalidClientTokenId")),
            String::from("The security token included in the request is invalid."),
        );
        assert!(matches!(err, ProviderError::Credentials { .. }));
    }

    #[test]
    fn test_missing_credentials_before_dispatch() {
        let err = classify(
            "DescribeNetworkInterfaces",
            None,
            String::from("dispatch failure: an error occurred while loading credentials"),
        );
        assert!(matches!(err, ProviderError::Credentials { .. }));
    }

    #[test]
    fn test_throttling_is_api_error() {
        let err = classify(
            "RegisterTargets",
            Some(String::from("Throttling")),
            String::from("Rate exceeded"),
        );
        match err {
            ProviderError::Api { operation, code, .. } => {
                assert_eq!(operation, "RegisterTargets");
                assert_eq!(code.as_deref(), Some("Throttling"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_service_message_mentioning_credentials_keeps_code() {
        // A coded service error is never reclassified from its text.
        let err = classify(
            "RegisterTargets",
            Some(String::from("ValidationError")),
            String::from("credential scope mismatch"),
        );
        assert!(matches!(err, ProviderError::Api { .. }));
    }
}
