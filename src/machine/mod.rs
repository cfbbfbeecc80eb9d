//! State machines that own states and dispatch transitions.
//!
//! Two variants with different transition-resolution policies:
//!
//! - [`GuardedMachine`]: the current state must accept a transition before it
//!   is performed (explicit edges per state).
//! - [`FlatMachine`]: a transition identifier directly names the state to move
//!   to, from anywhere.
//!
//! Both are single-threaded and host-driven. Nothing is scheduled; every call
//! runs to completion, and a rejected call leaves the machine untouched.

mod config;
mod flat;
mod guarded;
mod registry;

pub use config::{MachineConfig, DEFAULT_MACHINE_NAME};
pub use flat::{BoxedState, FlatMachine};
pub use guarded::{BoxedGuardedState, GuardedMachine, TransitionOutcome};
