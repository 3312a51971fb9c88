//! Error types for breeding simulations.
//!
//! Missing pedigree or measurements never produce an error: they lower the
//! confidence of the result instead. Errors are reserved for requests that
//! make no sense against the herd.

use genetics::GeneticsError;
use herdbook::{Gender, ProviderError};

/// Error types for breeding operations.
#[derive(Debug, thiserror::Error)]
pub enum BreedingError {
    /// Id not present in the herd snapshot
    #[error("Animal not found in herd: {id}")]
    AnimalNotFound { id: String },

    /// Sire and dam are the same animal
    #[error("Animal cannot be paired with itself: {id}")]
    SelfPairing { id: String },

    /// Animal supplied in a role its sex does not allow
    #[error("Role mismatch for {id}: expected a {} animal", .expected.as_str())]
    RoleMismatch { id: String, expected: Gender },

    /// Herd data collaborator failed
    #[error("Herd provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Background computation failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ProviderError> for BreedingError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl From<GeneticsError> for BreedingError {
    fn from(err: GeneticsError) -> Self {
        match err {
            GeneticsError::AnimalNotFound { id } => Self::AnimalNotFound { id },
        }
    }
}

pub type Result<T> = std::result::Result<T, BreedingError>;
