//! # Lexis Gates
//!
//! Feature gating on account stats.
//!
//! A [`Feature`] carries a [`Condition`] over level, experience, streak and a
//! single achievement. Absent keys impose nothing; present keys must all
//! hold. Evaluation is total: any input, including negative stats, yields a
//! boolean.
//!
//! ```
//! use lexis_gates::{AccountStats, FeatureGate};
//!
//! let gate = FeatureGate::default();
//! let stats = AccountStats::new(3, 600, 1);
//! assert!(gate.is_feature_unlocked("card-collection", &stats));
//! assert!(!gate.is_feature_unlocked("essay", &stats));
//! ```

pub mod catalogue;
pub mod error;
pub mod feature;
pub mod gate;

pub use catalogue::default_features;
pub use error::{GateError, Result};
pub use feature::{AccountStats, Condition, Feature};
pub use gate::{FeatureGate, FeatureProgress, PriorityKey, Requirement, NEXT_UNLOCKABLE_LIMIT};
