//! Core state machine types.
//!
//! This module contains the building blocks shared by both machine variants:
//! - Identifier domains via the `StateId` trait
//! - The `State` capability contract and its whitelisting extension
//! - Per-state transition sets
//! - Hook context, error taxonomy and transition history

mod context;
mod error;
mod history;
mod id;
mod state;
mod transitions;

pub use context::TransitionContext;
pub use error::{FsmError, FsmResult, Operation};
pub(crate) use error::report;
pub use history::{StateHistory, StateTransition};
pub use id::{MachineId, StateId};
pub use state::{GuardedState, State};
pub use transitions::TransitionSet;
