//! Lock-step parallel Life engine.
//!
//! Submodules follow the component stack bottom-up: `board` holds the
//! double-buffered grid, `rules` the clamped neighborhood and B3/S23
//! transition, `partition` the row ownership policies, `sync` the
//! generation barrier, and `engine` the worker pool driving them.

pub mod board;
pub mod engine;
pub mod partition;
pub mod rules;
pub(crate) mod sync;

pub use board::Board;
pub use engine::{LockstepLife, LockstepLifeConfig};
pub use partition::PartitionPolicy;
pub use rules::{count_live_neighbors, next_state};
