use thiserror::Error;

/// Failures a catalog request can end with.
///
/// `Transport` covers requests that never produced a response. `Status` and
/// `Decode` are both response errors: the server answered, but not with
/// something usable. An empty listing is not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

impl Error {
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Error::Status { .. } | Error::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
