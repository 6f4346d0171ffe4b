// ============================================================================
// reactive-mv - Error Types
// ============================================================================

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the store and binding layer.
///
/// Every failure is synchronous and fatal to the invoking call: an operation
/// either fully succeeds or has no observable effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A key was referenced before `Model::add_key` registered it.
    #[error("key [{key}] missing in model, call Model::add_key first")]
    MissingKey { key: String },

    /// `Model::add_key` was called twice with the same name.
    #[error("key [{key}] already in model")]
    DuplicateKey { key: String },

    /// A content-switcher input did not hold a usable content map:
    /// wrong value kind, empty map, or branches with diverging field sets.
    #[error("invalid contents: {reason}")]
    InvalidContents { reason: String },
}

impl Error {
    pub(crate) fn missing_key(key: &str) -> Self {
        Self::MissingKey {
            key: key.to_string(),
        }
    }

    pub(crate) fn duplicate_key(key: &str) -> Self {
        Self::DuplicateKey {
            key: key.to_string(),
        }
    }

    pub(crate) fn invalid_contents(reason: impl Into<String>) -> Self {
        Self::InvalidContents {
            reason: reason.into(),
        }
    }
}
