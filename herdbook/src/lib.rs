//! Herd data model for breeding decisions.
//!
//! Animals, their measurement history, and the immutable [`HerdSnapshot`]
//! every genetic and morphometric calculation runs against.
//!
//! # Key Components
//!
//! - [`Animal`]: identity, sex, weak parent references and measurements
//! - [`HerdSnapshot`]: read-only, id-indexed view over a herd
//! - [`HerdProvider`]: collaborator trait for fetching herds from a store
//!
//! # Example
//!
//! ```ignore
//! use herdbook::{Animal, BodyTrait, Gender, HerdSnapshot};
//!
//! let ram = Animal::new("FR-001", Gender::Male).with_static(BodyTrait::Height, 98.0);
//! let herd = HerdSnapshot::new(vec![ram]);
//! assert_eq!(herd.latest_value("FR-001", BodyTrait::Height), Some(98.0));
//! ```

pub mod herd;
pub mod provider;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// Re-export main types
pub use herd::HerdSnapshot;
pub use provider::{HerdProvider, InMemoryHerdProvider, ProviderError};
pub use types::*;
