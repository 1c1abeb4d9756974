//! Lock-step parallel Conway's Game of Life engine (B3/S23).
//!
//! A fixed pool of OS worker threads advances a double-buffered board one
//! synchronized generation at a time, with rows owned statically per worker
//! or claimed dynamically from a shared counter.

pub mod error;
pub mod io;
pub mod lockstep;

pub use error::{LifeError, Result};
pub use lockstep::{Board, LockstepLife, LockstepLifeConfig, PartitionPolicy};
