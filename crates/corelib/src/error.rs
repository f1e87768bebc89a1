//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Resolution was attempted on a ring with no data nodes.
    #[error("ring has no data nodes")]
    EmptyRing,
    /// A data node with this name is already on the ring.
    #[error("data node already exists: {0}")]
    DuplicateNode(String),
    /// Invalid node definition
    #[error("invalid node: {0}")]
    InvalidNode(String),
    /// Invalid ring configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
