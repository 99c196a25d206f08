//! # Lexis Engine
//!
//! The host-facing facade of the progression engine.
//!
//! [`ProgressionEngine`] owns a validated skill graph, a feature catalogue
//! and a progress store, and exposes the three host interfaces:
//!
//! - **Sessions**: [`ProgressionEngine::report_session`]
//! - **UI**: tree state, recommendations, completion, node status and
//!   feature gate queries
//! - **Notifications**: [`ProgressionEngine::check_for_new_unlocks`]
//!
//! Everything is synchronous. One engine per user; two engines sharing a
//! backend lose updates (last write wins).
//!
//! ```
//! use lexis_engine::ProgressionEngine;
//! use lexis_graph::default_graph;
//! use lexis_progress::MemoryBackend;
//!
//! let mut engine = ProgressionEngine::new(default_graph()?, MemoryBackend::new());
//! engine.report_session("alphabet", 9, 10, 5)?;
//! assert!(engine.skill_tree_state().is_unlocked("greetings"));
//! # Ok::<(), lexis_engine::EngineError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::{EngineConfig, DEFAULT_DATA_DIR};
pub use engine::{load_features, load_graph, ProgressionEngine};
pub use error::{EngineError, Result};
