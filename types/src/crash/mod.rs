//! Crash game domain types.
//!
//! Defines recorded outcomes, the statistics summary and histogram shapes, and the constants
//! shared by the execution layer and the simulator.

mod constants;
mod outcome;
mod summary;

pub use constants::*;
pub use outcome::*;
pub use summary::*;
