//! Traffic Light State Machine
//!
//! This example drives a flat machine from a simple host loop.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - Host-driven reason/act loop
//! - Any state reachable by its identifier
//! - Lifecycle hooks around each hand-off
//!
//! Run with: RUST_LOG=debug cargo run --example traffic_light

use brainstem::core::{State, TransitionContext};
use brainstem::machine::FlatMachine;
use brainstem::state_id;
use tracing_subscriber::EnvFilter;

state_id! {
    enum Light {
        null: None,
        Red,
        Yellow,
        Green,
    }
}

/// Ticks spent in the current light.
#[derive(Default)]
struct Timer {
    ticks: u32,
}

struct Lamp {
    id: Light,
    next: Light,
    duration: u32,
}

impl State for Lamp {
    type Id = Light;
    type Actor = Timer;

    fn id(&self) -> Light {
        self.id
    }

    fn reason(&mut self, timer: &mut Timer) -> Option<Light> {
        (timer.ticks >= self.duration).then_some(self.next)
    }

    fn act(&mut self, timer: &mut Timer) {
        timer.ticks += 1;
    }

    fn on_enter(&mut self, ctx: &TransitionContext<Light>) {
        println!("  {:?} -> {:?}", ctx.from, ctx.to);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let mut machine = FlatMachine::builder()
        .name("traffic-light")
        .state(Lamp {
            id: Light::Red,
            next: Light::Green,
            duration: 3,
        })
        .state(Lamp {
            id: Light::Green,
            next: Light::Yellow,
            duration: 3,
        })
        .state(Lamp {
            id: Light::Yellow,
            next: Light::Red,
            duration: 1,
        })
        .build()
        .unwrap();

    println!("Initial state: {:?}\n", machine.current_id());
    println!("Transition sequence:");

    let mut timer = Timer::default();
    for _ in 0..20 {
        if let Some(next) = machine.reason(&mut timer).unwrap() {
            machine.perform_transition(next).unwrap();
            timer.ticks = 0;
        }
        machine.act(&mut timer).unwrap();
    }

    println!("\nPath: {:?}", machine.history().get_path());

    // Emergency override: a flat machine can jump anywhere.
    machine.perform_transition(Light::Red).unwrap();
    println!("After override: {:?}", machine.current_id());

    println!("\n=== Example Complete ===");
}
