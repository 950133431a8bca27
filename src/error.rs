//! Error handling module for the profile model
//!
//! The profile tree itself never fails: queries are total and hooks default
//! to no-ops. Errors only appear at the edges, where names are looked up in
//! the catalog, selections are restored from disk, or an install session
//! rejects an action.

use thiserror::Error;

/// Main error type for profile catalog, selection and session operations
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A profile name was not found in the catalog
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    /// A profile with the same name is already registered
    #[error("Duplicate profile: {0}")]
    DuplicateProfile(String),

    /// A selection tree is not valid for the requested operation
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// The install session refused an action
    #[error("Install session error: {0}")]
    Session(String),

    /// IO errors (reading or writing configuration files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for profile operations
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    /// Create an unknown-profile error
    pub fn unknown_profile(name: impl Into<String>) -> Self {
        Self::UnknownProfile(name.into())
    }

    /// Create a duplicate-profile error
    pub fn duplicate_profile(name: impl Into<String>) -> Self {
        Self::DuplicateProfile(name.into())
    }

    /// Create an invalid-selection error
    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelection(msg.into())
    }

    /// Create an install session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }
}
