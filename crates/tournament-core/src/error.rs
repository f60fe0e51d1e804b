use thiserror::Error;

/// A stored text value that does not name a known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown match status: {0}")]
    MatchStatus(String),

    #[error("Unknown event type: {0}")]
    EventType(String),
}
