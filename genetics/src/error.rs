//! Error types for pedigree analysis.

/// Error types for genetics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneticsError {
    /// Id not present in the herd snapshot
    #[error("Animal not found in herd: {id}")]
    AnimalNotFound { id: String },
}

pub type Result<T> = std::result::Result<T, GeneticsError>;
