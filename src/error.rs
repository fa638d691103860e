// Error type shared by the API client and the card renderer. Every variant
// is fatal to the command that produced it; nothing here is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with something other than 200. The body is kept
    /// verbatim since it is the only diagnostic Trello gives us.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("response is not a JSON array: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("cannot decode element {index} of the response: {source}")]
    Decode {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
