//! Outcome codes reported at the end of a repository cycle.
//!
//! Every cycle ends with exactly one [`OutcomeCode`]. The codes form a closed
//! set partitioned into [`OutcomeGroup`]s, but the code arrives from the
//! orchestrator as free text, so anything outside the known set is kept as
//! [`OutcomeCode::Unrecognized`] instead of being rejected.

mod code;
mod group;

pub use code::OutcomeCode;
pub use group::OutcomeGroup;
