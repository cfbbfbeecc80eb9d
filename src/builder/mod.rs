//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and the `state_id!` macro for
//! declaring identifier domains with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::{FlatMachineBuilder, GuardedMachineBuilder, MachineBuilder};
