//! Pedigree genetics for breeding decisions.
//!
//! - [`PedigreeResolver`]: parent, grandparent and ancestor lookups over a
//!   [`herdbook::HerdSnapshot`], pedigree depth, common ancestors and
//!   ancestor path enumeration, all bounded by a hard generation cap
//! - [`InbreedingCalculator`]: Wright's path-method inbreeding coefficient,
//!   qualified by pedigree completeness
//!
//! # Known limitation
//!
//! The inbreeding of each common ancestor (Fa) is taken as zero. The
//! coefficient is therefore a lower bound when ancestors are themselves
//! inbred.
//!
//! # Example
//!
//! ```ignore
//! use genetics::{inbreeding_coefficient, RiskLevel};
//!
//! let result = inbreeding_coefficient("RAM-12", "EWE-40", &herd, 5)?;
//! if result.risk_level == RiskLevel::High {
//!     // avoid this pairing
//! }
//! ```

pub mod config;
pub mod error;
pub mod inbreeding;
pub mod pedigree;

// Re-export main types
pub use config::GeneticsConfig;
pub use error::GeneticsError;
pub use inbreeding::{
    inbreeding_coefficient, AncestorContribution, InbreedingCalculator, InbreedingResult,
    PedigreeStatus, Relationship, RiskLevel,
};
pub use pedigree::{pedigree_depth, Grandparents, Parents, PedigreeResolver, MAX_PEDIGREE_DEPTH};
