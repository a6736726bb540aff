//! Classify HTTP status and curl errors into error kinds.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Classify an HTTP status code.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        _ => ErrorKind::HttpStatus(code.min(u16::MAX as u32) as u16),
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_resolve_proxy() {
        return ErrorKind::Proxy;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_ssl_connect_error()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Classify a fetch error into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Transport(ce) => classify_curl_error(ce),
        FetchError::HttpStatus(code) => classify_http_status(*code),
        FetchError::Interrupted => ErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_429_and_503_throttled() {
        assert_eq!(classify_http_status(429), ErrorKind::Throttled);
        assert_eq!(classify_http_status(503), ErrorKind::Throttled);
    }

    #[test]
    fn other_statuses_keep_code() {
        assert_eq!(classify_http_status(404), ErrorKind::HttpStatus(404));
        assert_eq!(classify_http_status(500), ErrorKind::HttpStatus(500));
    }

    #[test]
    fn fetch_error_status_classified() {
        assert_eq!(classify(&FetchError::HttpStatus(503)), ErrorKind::Throttled);
        assert_eq!(classify(&FetchError::HttpStatus(403)), ErrorKind::HttpStatus(403));
    }
}
