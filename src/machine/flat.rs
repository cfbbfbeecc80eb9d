//! Machine where any registered state is reachable from any other.

use super::config::MachineConfig;
use super::registry::Registry;
use crate::core::{
    report, FsmError, FsmResult, MachineId, Operation, State, StateHistory, StateId,
    StateTransition,
};

/// Boxed state stored by a [`FlatMachine`].
pub type BoxedState<I, A> = Box<dyn State<Id = I, Actor = A>>;

/// State machine that treats a transition identifier as the target state.
///
/// There are no per-state whitelists: requesting `X` moves to the state
/// identified by `X` from wherever the machine is. The active identifier is
/// always derived from the active state, so the two can never disagree.
///
/// # Example
///
/// ```rust
/// use brainstem::core::State;
/// use brainstem::machine::FlatMachine;
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
/// struct Lamp(Light);
///
/// impl State for Lamp {
///     type Id = Light;
///     type Actor = ();
///
///     fn id(&self) -> Light {
///         self.0
///     }
///
///     fn reason(&mut self, _: &mut ()) -> Option<Light> {
///         None
///     }
///
///     fn act(&mut self, _: &mut ()) {}
/// }
///
/// let mut machine = FlatMachine::new();
/// machine.add_state(Lamp(Light::Red)).unwrap();
/// machine.add_state(Lamp(Light::Green)).unwrap();
///
/// machine.perform_transition(Light::Green).unwrap();
/// assert_eq!(machine.current_id(), Some(Light::Green));
/// machine.perform_transition(Light::Red).unwrap();
/// assert_eq!(machine.current_id(), Some(Light::Red));
/// ```
pub struct FlatMachine<I: StateId, A: 'static> {
    registry: Registry<dyn State<Id = I, Actor = A>>,
}

impl<I: StateId, A: 'static> Default for FlatMachine<I, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: StateId, A: 'static> FlatMachine<I, A> {
    /// Create an empty machine with default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            registry: Registry::new(config),
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
        S: State<Id = I, Actor = A> + 'static,
    {
        self.add_boxed_state(Box::new(state))
    }

    pub fn add_boxed_state(&mut self, state: BoxedState<I, A>) -> FsmResult<(), I> {
        self.registry.add(state)
    }

    /// Deregister a state and hand it back.
    ///
    /// Fails with `NullIdentifierMisuse` for the sentinel, `StateNotFound` if
    /// no such state is registered, and `ActiveStateRemoval` if it is active.
    pub fn remove_state(&mut self, id: I) -> FsmResult<BoxedState<I, A>, I> {
        self.registry.remove(id)
    }

    /// Move to the state identified by `trans`.
    ///
    /// Fails without side effects if `trans` is the sentinel or no such state
    /// is registered. Otherwise the current state's `on_exit` runs, the target
    /// becomes current and its `on_enter` runs. Targeting the current state
    /// re-enters it.
    pub fn perform_transition(&mut self, trans: I) -> FsmResult<StateTransition<I>, I> {
        let op = Operation::PerformTransition;
        if trans.is_null() {
            return report(
                self.registry.name(),
                FsmError::NullIdentifierMisuse { operation: op },
            );
        }

        let Some(to) = self.registry.position(trans) else {
            return report(
                self.registry.name(),
                FsmError::StateNotFound {
                    operation: op,
                    id: trans,
                },
            );
        };

        let Some(from) = self.registry.current_index() else {
            return report(
                self.registry.name(),
                FsmError::Uninitialized { operation: op },
            );
        };

        Ok(self.registry.hand_off(from, to, trans))
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
    pub fn current_id(&self) -> Option<I> {
        self.registry.current().map(|s| s.id())
    }

    pub fn current_state(&self) -> Option<&(dyn State<Id = I, Actor = A> + 'static)> {
        self.registry.current()
    }

    pub fn current_state_mut(&mut self) -> Option<&mut (dyn State<Id = I, Actor = A> + 'static)> {
        self.registry.current_mut()
    }

    pub fn state(&self, id: I) -> Option<&(dyn State<Id = I, Actor = A> + 'static)> {
        self.registry.get(id)
    }

    pub fn state_mut(&mut self, id: I) -> Option<&mut (dyn State<Id = I, Actor = A> + 'static)> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionContext;
    use crate::state_id;
    use std::cell::RefCell;
    use std::rc::Rc;

    state_id! {
        enum Light {
            null: Null,
            Red,
            Yellow,
            Green,
            Off,
        }
    }

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Lamp {
        id: Light,
        next: Light,
        journal: Journal,
    }

    impl Lamp {
        fn new(id: Light, next: Light, journal: &Journal) -> Self {
            Self {
                id,
                next,
                journal: Rc::clone(journal),
            }
        }
    }

    impl State for Lamp {
        type Id = Light;
        type Actor = u32;

        fn id(&self) -> Light {
            self.id
        }

        fn reason(&mut self, elapsed: &mut u32) -> Option<Light> {
            (*elapsed >= 3).then_some(self.next)
        }

        fn act(&mut self, elapsed: &mut u32) {
            *elapsed += 1;
        }

        fn on_enter(&mut self, ctx: &TransitionContext<Light>) {
            self.journal
                .borrow_mut()
                .push(format!("enter {:?} from {:?}", self.id, ctx.from));
        }

        fn on_exit(&mut self, ctx: &TransitionContext<Light>) {
            self.journal
                .borrow_mut()
                .push(format!("exit {:?} to {:?}", self.id, ctx.to));
        }
    }

    fn machine(journal: &Journal) -> FlatMachine<Light, u32> {
        let mut machine = FlatMachine::with_config(MachineConfig::named("traffic"));
        machine
            .add_state(Lamp::new(Light::Red, Light::Green, journal))
            .unwrap();
        machine
            .add_state(Lamp::new(Light::Green, Light::Yellow, journal))
            .unwrap();
        machine
            .add_state(Lamp::new(Light::Yellow, Light::Red, journal))
            .unwrap();
        machine
    }

    #[test]
    fn first_state_is_initial() {
        let journal = Journal::default();
        let machine = machine(&journal);

        assert_eq!(machine.current_id(), Some(Light::Red));
        assert_eq!(machine.config().name, "traffic");
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn transition_calls_exit_before_enter() {
        let journal = Journal::default();
        let mut machine = machine(&journal);

        let transition = machine.perform_transition(Light::Green).unwrap();

        assert_eq!(transition.from, Light::Red);
        assert_eq!(transition.to, Light::Green);
        assert_eq!(machine.current_id(), Some(Light::Green));
        assert_eq!(
            *journal.borrow(),
            vec!["exit Red to Green", "enter Green from Red"]
        );
    }

    #[test]
    fn any_state_is_reachable() {
        let journal = Journal::default();
        let mut machine = machine(&journal);

        machine.perform_transition(Light::Yellow).unwrap();
        machine.perform_transition(Light::Red).unwrap();
        machine.perform_transition(Light::Yellow).unwrap();

        assert_eq!(machine.current_id(), Some(Light::Yellow));
    }

    #[test]
    fn unknown_target_is_state_not_found() {
        let journal = Journal::default();
        let mut machine = machine(&journal);

        let result = machine.perform_transition(Light::Off);

        assert_eq!(
            result,
            Err(FsmError::StateNotFound {
                operation: Operation::PerformTransition,
                id: Light::Off,
            })
        );
        assert_eq!(machine.current_id(), Some(Light::Red));
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn transition_on_empty_machine_is_state_not_found() {
        let mut machine: FlatMachine<Light, u32> = FlatMachine::new();

        let result = machine.perform_transition(Light::Red);

        assert!(matches!(result, Err(FsmError::StateNotFound { .. })));
    }

    #[test]
    fn null_transition_is_rejected() {
        let journal = Journal::default();
        let mut machine = machine(&journal);

        let result = machine.perform_transition(Light::Null);

        assert!(matches!(
            result,
            Err(FsmError::NullIdentifierMisuse { .. })
        ));
        assert_eq!(machine.current_id(), Some(Light::Red));
    }

    #[test]
    fn self_transition_reenters_current_state() {
        let journal = Journal::default();
        let mut machine = machine(&journal);

        machine.perform_transition(Light::Red).unwrap();

        assert_eq!(
            *journal.borrow(),
            vec!["exit Red to Red", "enter Red from Red"]
        );
    }

    #[test]
    fn host_loop_drives_reason_and_act() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        let mut elapsed = 0;

        for _ in 0..7 {
            if let Some(next) = machine.reason(&mut elapsed).unwrap() {
                machine.perform_transition(next).unwrap();
                elapsed = 0;
            }
            machine.act(&mut elapsed).unwrap();
        }

        assert_eq!(
            machine.history().get_path(),
            vec![Light::Red, Light::Green, Light::Yellow]
        );
    }

    #[test]
    fn empty_machine_rejects_act() {
        let mut machine: FlatMachine<Light, u32> = FlatMachine::new();
        let mut elapsed = 0;

        assert!(matches!(
            machine.act(&mut elapsed),
            Err(FsmError::Uninitialized {
                operation: Operation::Act
            })
        ));
        assert!(matches!(
            machine.reason(&mut elapsed),
            Err(FsmError::Uninitialized {
                operation: Operation::Reason
            })
        ));
    }

    #[test]
    fn removing_active_state_is_rejected() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        machine.perform_transition(Light::Green).unwrap();

        let result = machine.remove_state(Light::Green);

        assert!(matches!(
            result,
            Err(FsmError::ActiveStateRemoval { id: Light::Green, .. })
        ));
        assert_eq!(machine.current_id(), Some(Light::Green));
    }

    #[test]
    fn removing_earlier_state_keeps_current() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        machine.perform_transition(Light::Yellow).unwrap();

        machine.remove_state(Light::Red).unwrap();

        assert_eq!(machine.current_id(), Some(Light::Yellow));
        assert!(!machine.contains(Light::Red));
        assert!(matches!(
            machine.perform_transition(Light::Red),
            Err(FsmError::StateNotFound { .. })
        ));
    }

    #[test]
    fn disabled_history_records_nothing() {
        let journal = Journal::default();
        let config = MachineConfig {
            record_history: false,
            ..MachineConfig::default()
        };
        let mut machine = FlatMachine::with_config(config);
        machine
            .add_state(Lamp::new(Light::Red, Light::Green, &journal))
            .unwrap();
        machine
            .add_state(Lamp::new(Light::Green, Light::Red, &journal))
            .unwrap();

        machine.perform_transition(Light::Green).unwrap();

        assert!(machine.history().is_empty());
        assert_eq!(machine.current_id(), Some(Light::Green));
    }

    #[test]
    fn largest_history_limit_is_accepted() {
        let journal = Journal::default();
        let config: MachineConfig =
            serde_json::from_str(&format!(r#"{{ "history_limit": {} }}"#, usize::MAX)).unwrap();
        assert_eq!(config.history_limit, Some(usize::MAX));

        let mut machine = FlatMachine::with_config(config);
        machine
            .add_state(Lamp::new(Light::Red, Light::Green, &journal))
            .unwrap();
        machine
            .add_state(Lamp::new(Light::Green, Light::Red, &journal))
            .unwrap();

        machine.perform_transition(Light::Green).unwrap();

        assert_eq!(machine.history().get_path(), vec![Light::Red, Light::Green]);
    }
}
