//! Machine whose states whitelist the transitions they accept.

use super::config::MachineConfig;
use super::registry::Registry;
use crate::core::{
    report, FsmError, FsmResult, GuardedState, MachineId, Operation, State, StateHistory,
    StateId, StateTransition,
};

/// Boxed state stored by a [`GuardedMachine`].
pub type BoxedGuardedState<I, A> = Box<dyn GuardedState<Id = I, Actor = A>>;

/// Result of a transition accepted by the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionOutcome<I: StateId> {
    /// The target state was found and entered.
    Completed(StateTransition<I>),

    /// The current state accepted the transition but no state with the target
    /// identifier is registered. `current_id` now reports `target` while the
    /// previous state object stays active and no hooks ran.
    Dangling { state: I, target: I },
}

impl<I: StateId> TransitionOutcome<I> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// State machine that resolves transitions through per-state whitelists.
///
/// A transition is performed only if the current state accepts it; the
/// accepted identifier then names the state to enter. This models the machine
/// as a graph with explicit edges.
///
/// The active identifier and the active state object are tracked separately.
/// They agree after every completed transition and diverge only after a
/// [`TransitionOutcome::Dangling`] result, which [`is_consistent`] detects.
///
/// [`is_consistent`]: GuardedMachine::is_consistent
///
/// # Example
///
/// ```rust
/// use brainstem::core::{GuardedState, State, TransitionSet};
/// use brainstem::machine::GuardedMachine;
/// use brainstem::state_id;
///
/// state_id! {
///     enum Door {
///         null: None,
///         Open,
///         Closed,
///     }
/// }
///
/// struct Node {
///     id: Door,
///     transitions: TransitionSet<Door>,
/// }
///
/// impl State for Node {
///     type Id = Door;
///     type Actor = ();
///
///     fn id(&self) -> Door {
///         self.id
///     }
///
///     fn reason(&mut self, _: &mut ()) -> Option<Door> {
///         None
///     }
///
///     fn act(&mut self, _: &mut ()) {}
/// }
///
/// impl GuardedState for Node {
///     fn transitions(&self) -> &TransitionSet<Door> {
///         &self.transitions
///     }
///
///     fn transitions_mut(&mut self) -> &mut TransitionSet<Door> {
///         &mut self.transitions
///     }
/// }
///
/// let mut open = Node { id: Door::Open, transitions: TransitionSet::new() };
/// open.add_transition(Door::Closed).unwrap();
/// let closed = Node { id: Door::Closed, transitions: TransitionSet::new() };
///
/// let mut machine = GuardedMachine::new();
/// machine.add_state(open).unwrap();
/// machine.add_state(closed).unwrap();
///
/// machine.perform_transition(Door::Closed).unwrap();
/// assert_eq!(machine.current_id(), Some(Door::Closed));
///
/// // Closed accepts nothing, so there is no way back.
/// assert!(machine.perform_transition(Door::Open).is_err());
/// ```
pub struct GuardedMachine<I: StateId, A: 'static> {
    registry: Registry<dyn GuardedState<Id = I, Actor = A>>,
    current_id: Option<I>,
}

impl<I: StateId, A: 'static> Default for GuardedMachine<I, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: StateId, A: 'static> GuardedMachine<I, A> {
    /// Create an empty machine with default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            registry: Registry::new(config),
            current_id: None,
        }
    }

    pub fn machine_id(&self) -> MachineId {
        self.registry.id()
    }

    pub fn config(&self) -> &MachineConfig {
        self.registry.config()
    }

    /// Register a state.
    ///
    /// The first state registered becomes current, without running hooks.
    /// Fails with `NullReferenceRejected` if the state reports the null
    /// identifier and with `DuplicateStateId` if its identifier is taken.
    pub fn add_state<S>(&mut self, state: S) -> FsmResult<(), I>
    where
        S: GuardedState<Id = I, Actor = A> + 'static,
    {
        self.add_boxed_state(Box::new(state))
    }

    pub fn add_boxed_state(&mut self, state: BoxedGuardedState<I, A>) -> FsmResult<(), I> {
        let id = state.id();
        let initial = self.registry.len() == 0;
        self.registry.add(state)?;
        if initial {
            self.current_id = Some(id);
        }
        Ok(())
    }

    /// Deregister a state and hand it back.
    ///
    /// Fails with `NullIdentifierMisuse` for the sentinel, `StateNotFound` if
    /// no such state is registered, and `ActiveStateRemoval` if it is the
    /// active state object.
    pub fn remove_state(&mut self, id: I) -> FsmResult<BoxedGuardedState<I, A>, I> {
        self.registry.remove(id)
    }

    /// Perform transition `trans` from the current state.
    ///
    /// Fails without side effects if `trans` is the sentinel, the machine is
    /// empty, or the current state does not accept `trans`. Otherwise
    /// `current_id` becomes `trans`; if a state with that identifier exists,
    /// the current state's `on_exit` runs, the found state becomes current and
    /// its `on_enter` runs. If none exists the result is
    /// [`TransitionOutcome::Dangling`].
    pub fn perform_transition(&mut self, trans: I) -> FsmResult<TransitionOutcome<I>, I> {
        let op = Operation::PerformTransition;
        if trans.is_null() {
            return report(
                self.registry.name(),
                FsmError::NullIdentifierMisuse { operation: op },
            );
        }

        let Some(from) = self.registry.current_index() else {
            return report(
                self.registry.name(),
                FsmError::Uninitialized { operation: op },
            );
        };
        let current = self.registry.at(from);
        let state_id = current.id();
        let resolved = current.resolve_transition(trans);

        if resolved.is_null() {
            return report(
                self.registry.name(),
                FsmError::TransitionNotAccepted {
                    operation: op,
                    state: state_id,
                    transition: trans,
                },
            );
        }

        self.current_id = Some(resolved);

        match self.registry.position(resolved) {
            Some(to) => Ok(TransitionOutcome::Completed(
                self.registry.hand_off(from, to, trans),
            )),
            None => {
                tracing::warn!(
                    machine = %self.registry.name(),
                    state = ?state_id,
                    target = ?resolved,
                    "Accepted transition targets an unregistered state; current id and state now disagree"
                );
                Ok(TransitionOutcome::Dangling {
                    state: state_id,
                    target: resolved,
                })
            }
        }
    }

    /// Let the current state decide whether to move on.
    pub fn reason(&mut self, actor: &mut A) -> FsmResult<Option<I>, I> {
        match self.registry.current_mut() {
            Some(state) => Ok(state.reason(actor)),
            None => report(
                self.registry.name(),
                FsmError::Uninitialized {
                    operation: Operation::Reason,
                },
            ),
        }
    }

    /// Run the current state's per-tick behavior.
    pub fn act(&mut self, actor: &mut A) -> FsmResult<(), I> {
        match self.registry.current_mut() {
            Some(state) => {
                state.act(actor);
                Ok(())
            }
            None => report(
                self.registry.name(),
                FsmError::Uninitialized {
                    operation: Operation::Act,
                },
            ),
        }
    }

    /// The active identifier, `None` before any state is added.
    ///
    /// After a dangling transition this names the unregistered target rather
    /// than the active state object.
    pub fn current_id(&self) -> Option<I> {
        self.current_id
    }

    pub fn current_state(&self) -> Option<&(dyn GuardedState<Id = I, Actor = A> + 'static)> {
        self.registry.current()
    }

    pub fn current_state_mut(
        &mut self,
    ) -> Option<&mut (dyn GuardedState<Id = I, Actor = A> + 'static)> {
        self.registry.current_mut()
    }

    /// Check that the active identifier names the active state object.
    pub fn is_consistent(&self) -> bool {
        self.current_id == self.registry.current().map(|s| s.id())
    }

    pub fn state(&self, id: I) -> Option<&(dyn GuardedState<Id = I, Actor = A> + 'static)> {
        self.registry.get(id)
    }

    pub fn state_mut(
        &mut self,
        id: I,
    ) -> Option<&mut (dyn GuardedState<Id = I, Actor = A> + 'static)> {
        self.registry.get_mut(id)
    }

    pub fn contains(&self, id: I) -> bool {
        self.registry.position(id).is_some()
    }

    /// Registered identifiers in insertion order.
    pub fn state_ids(&self) -> impl Iterator<Item = I> + '_ {
        self.registry.ids()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    pub fn history(&self) -> &StateHistory<I> {
        self.registry.history()
    }
}
