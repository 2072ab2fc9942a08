// Unit Tests for Chat Error Handling
//
// UNIT UNDER TEST: ChatError
//
// BUSINESS RESPONSIBILITY:
//   - Classifies every failure of a completion call into one variant
//   - Maps variants to categories and severities for reporting
//   - Produces user-facing messages without leaking internals
//   - Marks transient failures without ever retrying itself
//
// TEST COVERAGE:
//   - Category and severity of each failure class
//   - Transport-class detection (connectivity and timeout)
//   - Transient flag for quota, timeouts and 5xx only
//   - User message content, including Retry-After hints

use crate::error::{ChatError, ErrorCategory, ErrorSeverity};
use std::time::Duration;

#[cfg(test)]
mod chat_error_categorization_tests {
    use super::*;

    #[test]
    fn test_configuration_error_is_client_error() {
        // Arrange & Act
        let error = ChatError::configuration_error("API key is required");

        // Assert
        assert_eq!(error.category(), ErrorCategory::Client);
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert!(!error.is_transient());
        assert!(!error.is_transport());
    }

    #[test]
    fn test_transport_error_is_external_and_transport_class() {
        // Arrange
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");

        // Act
        let error = ChatError::transport_error("connection refused", Some(Box::new(source)));

        // Assert
        assert_eq!(error.category(), ErrorCategory::External);
        assert!(error.is_transport());
        assert!(error.is_transient());
        assert!(
            std::error::Error::source(&error).is_some(),
            "Underlying cause should be preserved"
        );
    }

    #[test]
    fn test_timeout_is_transport_class() {
        let error = ChatError::timeout(Duration::from_secs(30));

        assert_eq!(error.category(), ErrorCategory::Transient);
        assert_eq!(error.severity(), ErrorSeverity::Warning);
        assert!(error.is_transport());
        assert_eq!(error.to_string(), "Request timed out after 30s");
    }

    #[test]
    fn test_sub_second_timeout_keeps_its_precision() {
        let error = ChatError::timeout(Duration::from_millis(300));

        assert_eq!(error.to_string(), "Request timed out after 300ms");
        assert_eq!(
            error.user_message(),
            "The chat gateway did not answer within 300ms"
        );
        match error {
            ChatError::Timeout { timeout } => assert_eq!(timeout, Duration::from_millis(300)),
            other => panic!("Expected Timeout, got: {:?}", other),
        }
    }

    #[test]
    fn test_authentication_failure_is_not_transient() {
        let error = ChatError::authentication_failed("No auth credentials found");

        assert_eq!(error.category(), ErrorCategory::Client);
        assert!(!error.is_transient());
        assert!(!error.is_transport());
    }

    #[test]
    fn test_quota_exceeded_is_transient() {
        let error = ChatError::quota_exceeded("Rate limit exceeded", Some(20));

        assert_eq!(error.category(), ErrorCategory::Transient);
        assert!(error.is_transient());
        match error {
            ChatError::QuotaExceeded {
                retry_after_seconds,
                ..
            } => assert_eq!(retry_after_seconds, Some(20)),
            other => panic!("Expected QuotaExceeded, got: {:?}", other),
        }
    }

    #[test]
    fn test_service_error_transient_only_for_server_side_status() {
        // Arrange
        let server_side = ChatError::service_error(503, "upstream unavailable");
        let client_side = ChatError::service_error(400, "bad request");

        // Assert
        assert!(server_side.is_transient());
        assert!(!client_side.is_transient());
        assert_eq!(server_side.category(), ErrorCategory::External);
    }

    #[test]
    fn test_protocol_error_is_not_transient() {
        let error = ChatError::protocol_error("No choices in completion response");

        assert_eq!(error.category(), ErrorCategory::External);
        assert_eq!(error.severity(), ErrorSeverity::Warning);
        assert!(!error.is_transient());
        assert!(!error.is_transport());
    }

    #[test]
    fn test_output_failure_is_internal() {
        let error = ChatError::output_failed(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));

        assert_eq!(error.category(), ErrorCategory::Internal);
    }
}

#[cfg(test)]
mod chat_error_user_message_tests {
    use super::*;

    #[test]
    fn test_user_message_hides_transport_details() {
        let error = ChatError::transport_error("dns error: failed to lookup 10.0.0.7", None);

        let message = error.user_message();

        assert!(!message.contains("10.0.0.7"), "Internals must not leak");
        assert!(message.contains("Unable to reach"));
    }

    #[test]
    fn test_user_message_includes_retry_after_when_known() {
        let with_hint = ChatError::quota_exceeded("slow down", Some(42));
        let without_hint = ChatError::quota_exceeded("out of credits", None);

        assert!(with_hint.user_message().contains("42 seconds"));
        assert!(without_hint.user_message().contains("later"));
    }

    #[test]
    fn test_user_message_for_configuration_explains_problem() {
        let error = ChatError::configuration_error("API key is required (set OPENROUTER_API_KEY)");

        assert!(error.user_message().contains("OPENROUTER_API_KEY"));
    }

    #[test]
    fn test_user_message_for_service_error_names_status() {
        let error = ChatError::service_error(502, "bad gateway");

        assert!(error.user_message().contains("502"));
    }
}
