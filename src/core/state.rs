//! Capability contracts implemented by host-defined states.
//!
//! The engine only does bookkeeping. What a state does while active is the
//! host's business; the machine calls `on_exit`/`on_enter` around every hand-off
//! and never schedules `act` or `reason` on its own.

use super::context::TransitionContext;
use super::error::FsmResult;
use super::id::StateId;
use super::transitions::TransitionSet;

/// Trait for a single node of a state machine.
///
/// # Lifecycle
///
/// 1. Created by the host and registered into exactly one machine.
/// 2. `on_enter` runs right after the state becomes current, once the previous
///    state's `on_exit` has completed. The first registered state becomes
///    current implicitly and does not receive `on_enter`.
/// 3. `reason` and `act` run whenever the host's loop calls them.
/// 4. `on_exit` runs right before the state stops being current, before the
///    next state's `on_enter`.
///
/// `id` must return the same value for the lifetime of the state.
///
/// # Example
///
/// ```rust
/// use brainstem::core::{State, StateId};
/// use brainstem::state_id;
///
/// state_id! {
///     enum Mode {
///         null: None,
///         Idle,
///         Alert,
///     }
/// }
///
/// struct Idle {
///     ticks: u32,
/// }
///
/// impl State for Idle {
///     type Id = Mode;
///     type Actor = u32;
///
///     fn id(&self) -> Mode {
///         Mode::Idle
///     }
///
///     fn reason(&mut self, noise: &mut u32) -> Option<Mode> {
///         (*noise > 10).then_some(Mode::Alert)
///     }
///
///     fn act(&mut self, _noise: &mut u32) {
///         self.ticks += 1;
///     }
/// }
///
/// let mut idle = Idle { ticks: 0 };
/// let mut noise = 42;
/// assert_eq!(idle.reason(&mut noise), Some(Mode::Alert));
/// ```
pub trait State {
    /// Identifier domain shared by states and transitions.
    type Id: StateId;

    /// Host object the state reasons about and acts upon.
    type Actor;

    /// The state's immutable identifier.
    fn id(&self) -> Self::Id;

    /// Decide whether the machine should move on.
    ///
    /// Returns the transition the state wants, if any. The machine does not
    /// act on the answer; the host forwards it to `perform_transition`.
    fn reason(&mut self, actor: &mut Self::Actor) -> Option<Self::Id>;

    /// Per-tick behavior while this state is current.
    fn act(&mut self, actor: &mut Self::Actor);

    /// Prepare the state to reason and act.
    fn on_enter(&mut self, _ctx: &TransitionContext<Self::Id>) {}

    /// Release per-activation resources.
    fn on_exit(&mut self, _ctx: &TransitionContext<Self::Id>) {}
}

/// A state that whitelists the transitions it accepts.
///
/// Used by [`GuardedMachine`](crate::machine::GuardedMachine): a transition is
/// only performed if the current state accepts it. Implementors embed a
/// [`TransitionSet`] and expose it; the edit and lookup operations are provided.
pub trait GuardedState: State {
    fn transitions(&self) -> &TransitionSet<Self::Id>;

    fn transitions_mut(&mut self) -> &mut TransitionSet<Self::Id>;

    /// Register that this state accepts `trans`.
    ///
    /// Fails with `DuplicateStateId` if `trans` is already accepted.
    fn add_transition(&mut self, trans: Self::Id) -> FsmResult<(), Self::Id> {
        let owner = self.id();
        match self.transitions_mut().insert(trans) {
            Ok(()) => {
                tracing::trace!(state = ?owner, transition = ?trans, "Transition added");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    state = ?owner,
                    operation = %err.operation(),
                    error = %err,
                    "FSM state rejected transition"
                );
                Err(err)
            }
        }
    }

    /// Stop accepting `trans`.
    ///
    /// Fails with `NullIdentifierMisuse` for the sentinel and with
    /// `TransitionNotFound` if `trans` is not accepted.
    fn remove_transition(&mut self, trans: Self::Id) -> FsmResult<(), Self::Id> {
        let owner = self.id();
        self.transitions_mut().remove(owner, trans).inspect_err(|err| {
            tracing::warn!(
                state = ?owner,
                operation = %err.operation(),
                error = %err,
                "FSM state rejected transition"
            );
        })
    }

    /// Resolve `trans` to the identifier of the state it leads to.
    ///
    /// Returns `trans` when accepted, otherwise the null sentinel.
    fn resolve_transition(&self, trans: Self::Id) -> Self::Id {
        self.transitions().resolve(trans)
    }
}
