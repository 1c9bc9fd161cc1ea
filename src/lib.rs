//! Enrollment Registry
//!
//! Batch registry of learners enrolled under supervisors, with a score per
//! learner. Input is a stream of command lines split into independent test
//! cases; each case runs on a fresh registry and yields one output block.
//!
//! ## Module Structure
//!
//! - `registry`: the engine (enrollment, scores, exam listings)
//! - `command`: tokenizing and typed command parsing
//! - `dispatch`: runs command lines against one registry
//! - `render`: formats outcomes as output lines
//! - `input`: splits input into test cases
//! - `batch`: end-to-end batch runs
//! - `config`: TOML configuration
//! - `error`: error taxonomy

// ============================================================================
// MODULES
// ============================================================================

/// Batch runner
pub mod batch;

/// Command tokenizing and parsing
pub mod command;

/// Configuration
pub mod config;

/// Per-case command dispatch
pub mod dispatch;

/// Error types
pub mod error;

/// Test-case segmentation
pub mod input;

/// Registry engine
pub mod registry;

/// Output rendering
pub mod render;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use batch::{BatchRunner, BatchSummary, CaseReport};
pub use command::{tokenize, Command, CommandKind, Vocabulary};
pub use config::{CommandTokens, Messages, RegistryConfig, RemovePolicy};
pub use dispatch::{Dispatcher, Outcome};
pub use error::{ErrorKind, RegistryError, RegistryResult};
pub use input::{read_test_cases, TestCase, TestCaseReader};
pub use registry::{Inconsistency, LearnerRecord, RegistryEngine, Reply};
pub use render::Renderer;
