//! Classification of upstream HTTP failures.

use memo_core::UpstreamError;

use crate::types::UpstreamErrorBody;

/// Map an HTTP status and error body from an OpenAI-compatible endpoint to
/// the upstream error taxonomy.
pub fn classify_response(status: u16, body: &UpstreamErrorBody) -> UpstreamError {
    let message = body.message.clone();
    match status {
        401 | 403 => UpstreamError::Auth(message),
        429 => UpstreamError::RateLimit(message),
        408 | 504 => UpstreamError::Timeout(message),
        _ => UpstreamError::Request(format!("upstream returned {}: {}", status, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(message: &str) -> UpstreamErrorBody {
        UpstreamErrorBody {
            message: message.to_string(),
            error_type: String::new(),
            code: None,
        }
    }

    #[test]
    fn test_401_is_auth() {
        let err = classify_response(401, &body("invalid key"));
        assert!(matches!(err, UpstreamError::Auth(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_403_is_auth() {
        assert!(matches!(
            classify_response(403, &body("no access")),
            UpstreamError::Auth(_)
        ));
    }

    #[test]
    fn test_429_is_rate_limit_and_retryable() {
        let err = classify_response(429, &body("slow down"));
        assert!(matches!(err, UpstreamError::RateLimit(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_gateway_timeout_is_timeout() {
        assert!(matches!(
            classify_response(504, &body("upstream timed out")),
            UpstreamError::Timeout(_)
        ));
    }

    #[test]
    fn test_500_is_generic_request_error() {
        let err = classify_response(500, &body("server error"));
        match err {
            UpstreamError::Request(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
