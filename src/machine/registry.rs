//! State storage shared by both machine variants.

use super::config::MachineConfig;
use crate::core::{
    report, FsmError, FsmResult, MachineId, Operation, State, StateHistory, StateId,
    StateTransition, TransitionContext,
};
use chrono::Utc;

/// Insertion-ordered collection of boxed states plus the active index.
///
/// `S` is the trait object the variant stores, e.g. `dyn State<..>` or
/// `dyn GuardedState<..>`. Identifiers are unique and never null.
pub(crate) struct Registry<S: ?Sized + State> {
    id: MachineId,
    config: MachineConfig,
    states: Vec<Box<S>>,
    current: Option<usize>,
    history: StateHistory<S::Id>,
}

impl<S: ?Sized + State> Registry<S> {
    pub(crate) fn new(config: MachineConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => StateHistory::with_limit(limit),
            None => StateHistory::new(),
        };
        Self {
            id: MachineId::new(),
            config,
            states: Vec::new(),
            current: None,
            history,
        }
    }

    pub(crate) fn id(&self) -> MachineId {
        self.id
    }

    pub(crate) fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub(crate) fn name(&self) -> &str {
        &self.config.name
    }

    pub(crate) fn history(&self) -> &StateHistory<S::Id> {
        &self.history
    }

    /// Register `state`; the first registration becomes current without hooks.
    pub(crate) fn add(&mut self, state: Box<S>) -> FsmResult<(), S::Id> {
        let op = Operation::AddState;
        let id = state.id();
        if id.is_null() {
            return report(self.name(), FsmError::NullReferenceRejected { operation: op });
        }

        if self.states.is_empty() {
            self.states.push(state);
            self.current = Some(0);
            tracing::info!(machine = %self.config.name, state = ?id, initial = true, "Adding state");
            return Ok(());
        }

        if self.states.iter().any(|s| s.id() == id) {
            return report(self.name(), FsmError::DuplicateStateId { operation: op, id });
        }

        self.states.push(state);
        tracing::info!(machine = %self.config.name, state = ?id, "Adding state");
        Ok(())
    }

    /// Deregister the state identified by `id`, keeping the order of the rest.
    pub(crate) fn remove(&mut self, id: S::Id) -> FsmResult<Box<S>, S::Id> {
        let op = Operation::RemoveState;
        if id.is_null() {
            return report(self.name(), FsmError::NullIdentifierMisuse { operation: op });
        }

        let Some(index) = self.position(id) else {
            return report(self.name(), FsmError::StateNotFound { operation: op, id });
        };

        if self.current == Some(index) {
            return report(self.name(), FsmError::ActiveStateRemoval { operation: op, id });
        }

        let removed = self.states.remove(index);
        if let Some(current) = self.current {
            if index < current {
                self.current = Some(current - 1);
            }
        }
        tracing::info!(machine = %self.config.name, state = ?id, "Removing state");
        Ok(removed)
    }

    pub(crate) fn position(&self, id: S::Id) -> Option<usize> {
        self.states.iter().position(|s| s.id() == id)
    }

    pub(crate) fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub(crate) fn at(&self, index: usize) -> &S {
        &*self.states[index]
    }

    pub(crate) fn current(&self) -> Option<&S> {
        self.current.map(|index| &*self.states[index])
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut S> {
        match self.current {
            Some(index) => Some(&mut *self.states[index]),
            None => None,
        }
    }

    pub(crate) fn get(&self, id: S::Id) -> Option<&S> {
        self.states.iter().find(|s| s.id() == id).map(|s| &**s)
    }

    pub(crate) fn get_mut(&mut self, id: S::Id) -> Option<&mut S> {
        match self.states.iter_mut().find(|s| s.id() == id) {
            Some(state) => Some(&mut **state),
            None => None,
        }
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = S::Id> + '_ {
        self.states.iter().map(|s| s.id())
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    /// Move from the state at `from` to the state at `to`.
    ///
    /// Runs `on_exit` on the old state, swaps the active index, then runs
    /// `on_enter` on the new one. Both indices must be in range.
    pub(crate) fn hand_off(
        &mut self,
        from: usize,
        to: usize,
        trigger: S::Id,
    ) -> StateTransition<S::Id> {
        let ctx = TransitionContext::new(
            self.id,
            self.states[from].id(),
            self.states[to].id(),
            trigger,
        );

        self.states[from].on_exit(&ctx);
        self.current = Some(to);
        self.states[to].on_enter(&ctx);

        let transition = StateTransition {
            from: ctx.from,
            to: ctx.to,
            trigger,
            timestamp: Utc::now(),
        };
        if self.config.record_history {
            self.history.record(transition.clone());
        }

        tracing::debug!(
            machine = %self.config.name,
            from = ?ctx.from,
            to = ?ctx.to,
            trigger = ?trigger,
            elapsed = ?ctx.elapsed(),
            "Transition complete"
        );
        transition
    }
}
