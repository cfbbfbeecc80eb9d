//! Build errors for machine builders.

use crate::core::{FsmError, StateId};
use thiserror::Error;

/// Errors that can occur when building state machines.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildError<I: StateId> {
    #[error("No states defined. Add at least one state with .state(..) before .build()")]
    NoStates,

    #[error("State registration failed: {0}")]
    Registration(#[from] FsmError<I>),
}
