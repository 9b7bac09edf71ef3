//! Repository configuration and cycle report loading.
//!
//! The persisted configuration store lives outside this crate; what arrives
//! here is its TOML rendering. Both lifecycle flags are tri-state, see
//! [`Flag`].

mod cycles;
mod error;
mod flag;
mod repository;

pub use cycles::{load_cycle_reports, CycleReport};
pub use error::ConfigError;
pub use flag::{Flag, UNSET_MARKER};
pub use repository::RepoConfig;
