//! Context handed to lifecycle hooks.

use crate::core::id::{MachineId, StateId};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Context provided to `on_enter` and `on_exit`.
///
/// Identifies the machine driving the state and the hand-off in progress:
/// `from` is being left, `to` is being entered, and `trigger` is the
/// transition identifier the host requested.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionContext<I: StateId> {
    pub machine: MachineId,
    pub from: I,
    pub to: I,
    pub trigger: I,
    pub started_at: DateTime<Utc>,
}

impl<I: StateId> TransitionContext<I> {
    pub fn new(machine: MachineId, from: I, to: I, trigger: I) -> Self {
        Self {
            machine,
            from,
            to,
            trigger,
            started_at: Utc::now(),
        }
    }

    /// Check if the hand-off re-enters the state being left.
    pub fn is_reentry(&self) -> bool {
        self.from == self.to
    }

    /// Calculate elapsed time since the hand-off started (pure)
    pub fn elapsed(&self) -> Duration {
        let now = Utc::now();
        now.signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_id;

    state_id! {
        enum Stance {
            null: Null,
            Guard,
            Strike,
        }
    }

    #[test]
    fn context_carries_hand_off() {
        let machine = MachineId::new();
        let ctx = TransitionContext::new(machine, Stance::Guard, Stance::Strike, Stance::Strike);

        assert_eq!(ctx.machine, machine);
        assert_eq!(ctx.from, Stance::Guard);
        assert_eq!(ctx.to, Stance::Strike);
        assert_eq!(ctx.trigger, Stance::Strike);
        assert!(!ctx.is_reentry());
    }

    #[test]
    fn same_source_and_target_is_reentry() {
        let ctx = TransitionContext::new(
            MachineId::new(),
            Stance::Guard,
            Stance::Guard,
            Stance::Guard,
        );
        assert!(ctx.is_reentry());
    }

    #[test]
    fn elapsed_counts_from_start() {
        let mut ctx = TransitionContext::new(
            MachineId::new(),
            Stance::Guard,
            Stance::Strike,
            Stance::Strike,
        );
        ctx.started_at = Utc::now() - chrono::Duration::seconds(5);
        assert!(ctx.elapsed() >= Duration::from_secs(5));
    }

    #[test]
    fn future_start_reports_zero_elapsed() {
        let mut ctx = TransitionContext::new(
            MachineId::new(),
            Stance::Guard,
            Stance::Strike,
            Stance::Strike,
        );
        ctx.started_at = Utc::now() + chrono::Duration::seconds(60);
        assert_eq!(ctx.elapsed(), Duration::ZERO);
    }
}
