//! Per-state transition whitelists.
//!
//! A [`TransitionSet`] records which transitions a state accepts. Because
//! transitions and states share one identifier space, an accepted transition
//! resolves to the identifier of the state it leads to.

use super::error::{FsmError, FsmResult, Operation};
use super::id::StateId;
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of accepted transition identifiers.
///
/// Order is kept for stable diagnostics only; lookups are by membership.
///
/// # Example
///
/// ```rust
/// use brainstem::core::{StateId, TransitionSet};
/// use brainstem::state_id;
///
/// state_id! {
///     enum Light {
///         null: None,
///         Red,
///         Green,
///     }
/// }
///
/// let mut set = TransitionSet::new();
/// set.insert(Light::Green).unwrap();
///
/// assert_eq!(set.resolve(Light::Green), Light::Green);
/// assert_eq!(set.resolve(Light::Red), Light::None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionSet<I: StateId> {
    accepted: Vec<I>,
}

impl<I: StateId> Default for TransitionSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: StateId> TransitionSet<I> {
    pub fn new() -> Self {
        Self {
            accepted: Vec::new(),
        }
    }

    /// Accept transition `trans`.
    ///
    /// Fails with `DuplicateStateId` if `trans` is already accepted.
    pub fn insert(&mut self, trans: I) -> FsmResult<(), I> {
        if self.accepted.contains(&trans) {
            return Err(FsmError::DuplicateStateId {
                operation: Operation::AddTransition,
                id: trans,
            });
        }
        self.accepted.push(trans);
        Ok(())
    }

    /// Stop accepting transition `trans`.
    ///
    /// Fails with `NullIdentifierMisuse` for the sentinel and with
    /// `TransitionNotFound` (attributed to `owner`) if `trans` is not accepted.
    pub fn remove(&mut self, owner: I, trans: I) -> FsmResult<(), I> {
        if trans.is_null() {
            return Err(FsmError::NullIdentifierMisuse {
                operation: Operation::RemoveTransition,
            });
        }
        match self.accepted.iter().position(|t| *t == trans) {
            Some(index) => {
                self.accepted.remove(index);
                Ok(())
            }
            None => Err(FsmError::TransitionNotFound {
                operation: Operation::RemoveTransition,
                state: owner,
                transition: trans,
            }),
        }
    }

    /// Resolve `trans` to its target state identifier.
    ///
    /// Returns `trans` itself when accepted, otherwise the null sentinel.
    pub fn resolve(&self, trans: I) -> I {
        if self.contains(trans) {
            trans
        } else {
            I::NULL
        }
    }

    pub fn contains(&self, trans: I) -> bool {
        self.accepted.contains(&trans)
    }

    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.accepted.iter()
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

impl<I: StateId> FromIterator<I> for TransitionSet<I> {
    /// Collect identifiers, silently skipping duplicates.
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        let mut set = Self::new();
        for trans in iter {
            let _ = set.insert(trans);
        }
        set
    }
}
