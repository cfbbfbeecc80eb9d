//! Guard Patrol
//!
//! This example drives an NPC guard with a guarded machine, where each
//! state whitelists the transitions it accepts.
//!
//! Key concepts:
//! - Explicit edges per state
//! - Rejected transitions are reported, not fatal
//! - Detecting a transition whose target was never registered
//!
//! Run with: RUST_LOG=info cargo run --example guard_patrol

use brainstem::core::{GuardedState, State, TransitionContext, TransitionSet};
use brainstem::machine::{GuardedMachine, TransitionOutcome};
use brainstem::state_id;
use tracing_subscriber::EnvFilter;

state_id! {
    enum Guard {
        null: None,
        Patrol,
        Chase,
        Search,
        Flee,
    }
}

/// What the guard can perceive this tick.
struct Senses {
    player_distance: f32,
    health: u32,
    waypoint: usize,
}

struct Patrol {
    transitions: TransitionSet<Guard>,
    waypoints: usize,
}

struct Chase {
    transitions: TransitionSet<Guard>,
}

struct Search {
    transitions: TransitionSet<Guard>,
    turns_left: u32,
}

impl State for Patrol {
    type Id = Guard;
    type Actor = Senses;

    fn id(&self) -> Guard {
        Guard::Patrol
    }

    fn reason(&mut self, senses: &mut Senses) -> Option<Guard> {
        (senses.player_distance < 10.0).then_some(Guard::Chase)
    }

    fn act(&mut self, senses: &mut Senses) {
        senses.waypoint = (senses.waypoint + 1) % self.waypoints;
        println!("  patrolling to waypoint {}", senses.waypoint);
    }
}

impl GuardedState for Patrol {
    fn transitions(&self) -> &TransitionSet<Guard> {
        &self.transitions
    }

    fn transitions_mut(&mut self) -> &mut TransitionSet<Guard> {
        &mut self.transitions
    }
}

impl State for Chase {
    type Id = Guard;
    type Actor = Senses;

    fn id(&self) -> Guard {
        Guard::Chase
    }

    fn reason(&mut self, senses: &mut Senses) -> Option<Guard> {
        if senses.health < 20 {
            Some(Guard::Flee)
        } else if senses.player_distance > 25.0 {
            Some(Guard::Search)
        } else {
            None
        }
    }

    fn act(&mut self, senses: &mut Senses) {
        senses.player_distance += 6.0;
        println!("  chasing, player at {:.1}", senses.player_distance);
    }

    fn on_enter(&mut self, ctx: &TransitionContext<Guard>) {
        println!("  ! spotted the player while in {:?}", ctx.from);
    }
}

impl GuardedState for Chase {
    fn transitions(&self) -> &TransitionSet<Guard> {
        &self.transitions
    }

    fn transitions_mut(&mut self) -> &mut TransitionSet<Guard> {
        &mut self.transitions
    }
}

impl State for Search {
    type Id = Guard;
    type Actor = Senses;

    fn id(&self) -> Guard {
        Guard::Search
    }

    fn reason(&mut self, _senses: &mut Senses) -> Option<Guard> {
        (self.turns_left == 0).then_some(Guard::Patrol)
    }

    fn act(&mut self, _senses: &mut Senses) {
        self.turns_left = self.turns_left.saturating_sub(1);
        println!("  searching ({} turns left)", self.turns_left);
    }

    fn on_enter(&mut self, _ctx: &TransitionContext<Guard>) {
        self.turns_left = 3;
    }
}

impl GuardedState for Search {
    fn transitions(&self) -> &TransitionSet<Guard> {
        &self.transitions
    }

    fn transitions_mut(&mut self) -> &mut TransitionSet<Guard> {
        &mut self.transitions
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Guard Patrol ===\n");

    let mut patrol = Patrol {
        transitions: TransitionSet::new(),
        waypoints: 4,
    };
    patrol.add_transition(Guard::Chase).unwrap();

    let mut chase = Chase {
        transitions: TransitionSet::new(),
    };
    chase.add_transition(Guard::Search).unwrap();
    // Flee is accepted but never registered as a state.
    chase.add_transition(Guard::Flee).unwrap();

    let mut search = Search {
        transitions: TransitionSet::new(),
        turns_left: 0,
    };
    search.add_transition(Guard::Patrol).unwrap();
    search.add_transition(Guard::Chase).unwrap();

    let mut machine = GuardedMachine::builder()
        .name("guard")
        .state(patrol)
        .state(chase)
        .state(search)
        .build()
        .unwrap();

    let mut senses = Senses {
        player_distance: 40.0,
        health: 100,
        waypoint: 0,
    };

    for tick in 0..14 {
        if tick == 2 {
            senses.player_distance = 8.0;
        }
        if tick == 12 {
            senses.player_distance = 5.0;
            senses.health = 10;
        }

        if let Some(next) = machine.reason(&mut senses).unwrap() {
            match machine.perform_transition(next) {
                Ok(TransitionOutcome::Completed(t)) => {
                    println!("[{tick}] {:?} -> {:?}", t.from, t.to)
                }
                Ok(TransitionOutcome::Dangling { state, target }) => {
                    println!("[{tick}] {state:?} accepted {target:?}, but no such state exists");
                    break;
                }
                Err(err) => println!("[{tick}] rejected: {err}"),
            }
        }
        machine.act(&mut senses).unwrap();
    }

    println!("\nConsistent: {}", machine.is_consistent());

    // The Chase object is still active and does not accept Patrol.
    if let Err(err) = machine.perform_transition(Guard::Patrol) {
        println!("Rejected: {err}");
    }

    // Search is accepted and registered, which brings id and state back together.
    machine.perform_transition(Guard::Search).unwrap();
    println!("Consistent: {}", machine.is_consistent());
    println!("Path: {:?}", machine.history().get_path());

    println!("\n=== Example Complete ===");
}
