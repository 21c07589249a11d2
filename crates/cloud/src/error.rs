/// Any failure from the remote monitoring API.
///
/// Never retried locally; callers propagate it and abort.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// CloudWatch answered with a service error (validation, access denied,
    /// missing resource, throttling).
    #[error("{operation} rejected ({code}): {message}")]
    Service {
        operation: &'static str,
        code: String,
        message: String,
    },

    /// The request never got a service answer (credentials, DNS, TLS,
    /// timeout, malformed response).
    #[error("{operation} request failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },
}

impl BackendError {
    /// Service error code, if CloudWatch returned one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            Self::Request { .. } => None,
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            Self::Service { operation, .. } | Self::Request { operation, .. } => operation,
        }
    }
}
