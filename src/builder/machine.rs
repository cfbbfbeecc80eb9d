//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{GuardedState, State, StateId};
use crate::machine::{
    BoxedGuardedState, BoxedState, FlatMachine, GuardedMachine, MachineConfig,
};

/// Builder for constructing state machines with a fluent API.
///
/// States are registered in the order they are added, so the first one
/// becomes the initial state. Use the [`GuardedMachineBuilder`] and
/// [`FlatMachineBuilder`] aliases, or `GuardedMachine::builder()` /
/// `FlatMachine::builder()`.
pub struct MachineBuilder<S: ?Sized> {
    config: MachineConfig,
    states: Vec<Box<S>>,
}

/// Builder for a [`GuardedMachine`].
pub type GuardedMachineBuilder<I, A> = MachineBuilder<dyn GuardedState<Id = I, Actor = A>>;

/// Builder for a [`FlatMachine`].
pub type FlatMachineBuilder<I, A> = MachineBuilder<dyn State<Id = I, Actor = A>>;

impl<S: ?Sized> MachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            states: Vec::new(),
        }
    }

    /// Set the name attached to diagnostics.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Enable or disable transition history.
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.config.record_history = enabled;
        self
    }

    /// Keep at most `limit` history records.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = Some(limit);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S: ?Sized> Default for MachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: StateId, A: 'static> MachineBuilder<dyn GuardedState<Id = I, Actor = A>> {
    /// Add a state.
    pub fn state<T>(mut self, state: T) -> Self
    where
        T: GuardedState<Id = I, Actor = A> + 'static,
    {
        self.states.push(Box::new(state));
        self
    }

    /// Add multiple boxed states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = BoxedGuardedState<I, A>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Build the machine.
    /// Returns an error if no states were added or a registration fails.
    pub fn build(self) -> Result<GuardedMachine<I, A>, BuildError<I>> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut machine = GuardedMachine::with_config(self.config);
        for state in self.states {
            machine.add_boxed_state(state)?;
        }
        Ok(machine)
    }
}

impl<I: StateId, A: 'static> MachineBuilder<dyn State<Id = I, Actor = A>> {
    /// Add a state.
    pub fn state<T>(mut self, state: T) -> Self
    where
        T: State<Id = I, Actor = A> + 'static,
    {
        self.states.push(Box::new(state));
        self
    }

    /// Add multiple boxed states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = BoxedState<I, A>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Build the machine.
    /// Returns an error if no states were added or a registration fails.
    pub fn build(self) -> Result<FlatMachine<I, A>, BuildError<I>> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut machine = FlatMachine::with_config(self.config);
        for state in self.states {
            machine.add_boxed_state(state)?;
        }
        Ok(machine)
    }
}

impl<I: StateId, A: 'static> GuardedMachine<I, A> {
    pub fn builder() -> GuardedMachineBuilder<I, A> {
        MachineBuilder::new()
    }
}

impl<I: StateId, A: 'static> FlatMachine<I, A> {
    pub fn builder() -> FlatMachineBuilder<I, A> {
        MachineBuilder::new()
    }
}
