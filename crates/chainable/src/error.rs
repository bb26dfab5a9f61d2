//! Errors raised by member access, chaining and construction.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    #[error("no member `{key}` on {owner}")]
    MissingMember { key: String, owner: String },

    #[error("member `{key}` is not a data member")]
    NotData { key: String },

    #[error("member `{key}` is not callable")]
    NotCallable { key: String },

    /// The requested chaining operation is not the one this chain was
    /// wrapped with, or a later member replaced it.
    #[error("`{name}` is not the chaining operation of {owner}")]
    UnknownOperation { name: String, owner: String },

    #[error("cannot construct {base}: {reason}")]
    Construct { base: String, reason: String },

    /// Raised by user behaviors.
    #[error("{0}")]
    Behavior(String),
}

impl ChainError {
    pub fn missing(key: impl Into<String>, owner: impl Into<String>) -> Self {
        ChainError::MissingMember {
            key: key.into(),
            owner: owner.into(),
        }
    }

    pub fn behavior(message: impl Into<String>) -> Self {
        ChainError::Behavior(message.into())
    }
}
