//! Brainstem: a small finite state machine engine for agent loops
//!
//! Brainstem keeps track of a set of named states and which one is active,
//! and moves between them when the host asks. What a state actually does is
//! up to the host: the engine only calls the enter/exit hooks around each
//! hand-off and never schedules anything on its own.
//!
//! # Core Concepts
//!
//! - **StateId**: a closed identifier domain with an explicit null sentinel,
//!   usually declared with [`state_id!`]
//! - **State**: the capability contract a host state implements
//! - **GuardedMachine**: transitions must be whitelisted by the current state
//! - **FlatMachine**: any registered state is reachable by its identifier
//!
//! # Example
//!
//! ```rust
//! use brainstem::core::State;
//! use brainstem::machine::FlatMachine;
//! use brainstem::state_id;
//!
//! state_id! {
//!     enum Mood {
//!         null: None,
//!         Calm,
//!         Angry,
//!     }
//! }
//!
//! struct Calm;
//! struct Angry;
//!
//! impl State for Calm {
//!     type Id = Mood;
//!     type Actor = u32;
//!
//!     fn id(&self) -> Mood {
//!         Mood::Calm
//!     }
//!
//!     fn reason(&mut self, insults: &mut u32) -> Option<Mood> {
//!         (*insults > 2).then_some(Mood::Angry)
//!     }
//!
//!     fn act(&mut self, _insults: &mut u32) {}
//! }
//!
//! impl State for Angry {
//!     type Id = Mood;
//!     type Actor = u32;
//!
//!     fn id(&self) -> Mood {
//!         Mood::Angry
//!     }
//!
//!     fn reason(&mut self, _insults: &mut u32) -> Option<Mood> {
//!         None
//!     }
//!
//!     fn act(&mut self, insults: &mut u32) {
//!         *insults = 0;
//!     }
//! }
//!
//! let mut machine = FlatMachine::builder()
//!     .name("npc")
//!     .state(Calm)
//!     .state(Angry)
//!     .build()
//!     .unwrap();
//!
//! let mut insults = 3;
//! if let Some(next) = machine.reason(&mut insults).unwrap() {
//!     machine.perform_transition(next).unwrap();
//! }
//! machine.act(&mut insults).unwrap();
//!
//! assert_eq!(machine.current_id(), Some(Mood::Angry));
//! assert_eq!(insults, 0);
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder};
pub use crate::core::{FsmError, GuardedState, State, StateId, TransitionContext, TransitionSet};
pub use crate::machine::{FlatMachine, GuardedMachine, MachineConfig, TransitionOutcome};
