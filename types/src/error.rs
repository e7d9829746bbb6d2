use dioxus::prelude::ServerFnError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad classification of a failure, used to pick the HTTP status a server
/// function reports back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Unauthenticated => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::Internal => 500,
        }
    }
}

/// Application error.
///
/// Deliberately does not implement `std::error::Error`, so that anything
/// convertible into an `anyhow::Error` can be `?`-ed into it.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    inner: anyhow::Error,
}

impl Error {
    pub fn unauthenticated(inner: impl Into<anyhow::Error>) -> Self {
        Self {
            kind: ErrorKind::Unauthenticated,
            inner: inner.into(),
        }
    }

    pub fn forbidden(inner: impl Into<anyhow::Error>) -> Self {
        Self {
            kind: ErrorKind::Forbidden,
            inner: inner.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.inner
    }

    /// The error followed by each of its causes, outermost first.
    pub fn chain(&self) -> Vec<String> {
        self.inner.chain().map(|e| e.to_string()).collect()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl<E> From<E> for Error
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            kind: ErrorKind::Internal,
            inner: err.into(),
        }
    }
}

impl From<Error> for ServerFnError {
    fn from(err: Error) -> Self {
        let backtrace = err.inner.backtrace().to_string();
        ServerFnError::ServerError {
            message: err.to_string(),
            code: err.kind.status_code(),
            details: Some(serde_json::json!({
                "chain": err.chain(),
                "backtrace": backtrace,
            })),
        }
    }
}

/// Build an [`Error`](crate::Error) from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from($crate::internal_anyhow_dont_use!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_carries_status_and_chain() {
        let err = Error::forbidden(anyhow::anyhow!("not an admin").context("access denied"));

        match ServerFnError::from(err) {
            ServerFnError::ServerError {
                message,
                code,
                details,
            } => {
                assert_eq!(code, 403);
                assert_eq!(message, "access denied");
                let chain = details.unwrap()["chain"].clone();
                assert_eq!(chain, serde_json::json!(["access denied", "not an admin"]));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn err_macro_is_internal() {
        let err = crate::err!("missing {}", "thing");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.to_string(), "missing thing");
    }
}
