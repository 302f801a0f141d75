use thiserror::Error;

/// Errors surfaced by a page fetch.
///
/// Name resolution never produces one of these: resolver failures fall back
/// to the raw address inside [`crate::resolver::AddressResolver`].
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("GraphQL request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Malformed GraphQL response: {0}")]
    Decode(String),

    #[error("Account {0} not found")]
    AccountNotFound(String),
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;
