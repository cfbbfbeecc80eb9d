//! Errors reported by machine and state operations.
//!
//! Every failure is local and recoverable: the operation returns without
//! changing anything and the host decides what to do next.

use crate::core::id::StateId;
use std::fmt;
use thiserror::Error;

/// The public operation that reported a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    AddState,
    RemoveState,
    PerformTransition,
    AddTransition,
    RemoveTransition,
    Act,
    Reason,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddState => "add_state",
            Self::RemoveState => "remove_state",
            Self::PerformTransition => "perform_transition",
            Self::AddTransition => "add_transition",
            Self::RemoveTransition => "remove_transition",
            Self::Act => "act",
            Self::Reason => "reason",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when registering states or dispatching transitions
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FsmError<I: StateId> {
    #[error("{operation}: null state reference is not allowed")]
    NullReferenceRejected { operation: Operation },

    #[error("{operation}: identifier {id:?} has already been added")]
    DuplicateStateId { operation: Operation, id: I },

    #[error("{operation}: the null identifier is not allowed for a real state or transition")]
    NullIdentifierMisuse { operation: Operation },

    #[error("{operation}: state {id:?} is not registered in this machine")]
    StateNotFound { operation: Operation, id: I },

    #[error("{operation}: state {state:?} does not accept transition {transition:?}")]
    TransitionNotAccepted {
        operation: Operation,
        state: I,
        transition: I,
    },

    #[error("{operation}: transition {transition:?} is not on the transition list of state {state:?}")]
    TransitionNotFound {
        operation: Operation,
        state: I,
        transition: I,
    },

    #[error("{operation}: state {id:?} is currently active and cannot be removed")]
    ActiveStateRemoval { operation: Operation, id: I },

    #[error("{operation}: machine has no states")]
    Uninitialized { operation: Operation },
}

impl<I: StateId> FsmError<I> {
    /// The operation that reported this failure.
    pub fn operation(&self) -> Operation {
        match self {
            Self::NullReferenceRejected { operation }
            | Self::DuplicateStateId { operation, .. }
            | Self::NullIdentifierMisuse { operation }
            | Self::StateNotFound { operation, .. }
            | Self::TransitionNotAccepted { operation, .. }
            | Self::TransitionNotFound { operation, .. }
            | Self::ActiveStateRemoval { operation, .. }
            | Self::Uninitialized { operation } => *operation,
        }
    }
}

/// Result type for machine and state operations.
pub type FsmResult<T, I> = Result<T, FsmError<I>>;

/// Emit `err` on the diagnostic channel and return it.
pub(crate) fn report<T, I: StateId>(machine: &str, err: FsmError<I>) -> FsmResult<T, I> {
    tracing::warn!(
        machine = %machine,
        operation = %err.operation(),
        error = %err,
        "FSM operation rejected"
    );
    Err(err)
}
