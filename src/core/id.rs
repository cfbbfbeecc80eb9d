//! Identifier domains for states and transitions.
//!
//! A state machine addresses its states through a small, closed set of
//! identifiers supplied by the host. Transitions share the same identifier
//! space: requesting transition `X` means "move to the state identified by `X`".

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::Hash;
use uuid::Uuid;

/// Trait for the identifier domain of a state machine.
///
/// Each domain reserves exactly one sentinel value, [`StateId::NULL`], meaning
/// "no state" or "no transition". The sentinel is never a valid identifier for
/// a registered state or an accepted transition.
///
/// Most hosts generate implementations with the [`state_id!`](crate::state_id)
/// macro rather than writing them by hand.
///
/// # Required Traits
///
/// - `Copy` + `Eq` + `Hash`: identifiers are compared and stored by value
/// - `Ord`: the domain is totally ordered
/// - `Debug`: identifiers appear in diagnostics
/// - `Serialize` + `Deserialize`: identifiers appear in recorded history
///
/// # Example
///
/// ```rust
/// use brainstem::core::StateId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     None,
///     Open,
///     Closed,
/// }
///
/// impl StateId for Door {
///     const NULL: Self = Door::None;
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::None => "None",
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert!(Door::None.is_null());
/// assert!(!Door::Open.is_null());
/// ```
pub trait StateId:
    Copy + Eq + Ord + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// The reserved "no state / no transition" value.
    const NULL: Self;

    /// Get the identifier's name for display/logging.
    fn name(&self) -> &'static str;

    /// Check if this is the null sentinel.
    fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// Opaque identity of a machine instance.
///
/// Passed to lifecycle hooks in place of a back-reference, and attached to
/// every diagnostic event the machine emits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct MachineId(Uuid);

impl MachineId {
    /// Generate a fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MachineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
    enum TestId {
        Null,
        Idle,
        Patrol,
    }

    impl StateId for TestId {
        const NULL: Self = TestId::Null;

        fn name(&self) -> &'static str {
            match self {
                Self::Null => "Null",
                Self::Idle => "Idle",
                Self::Patrol => "Patrol",
            }
        }
    }

    #[test]
    fn null_sentinel_is_detected() {
        assert!(TestId::Null.is_null());
        assert!(!TestId::Idle.is_null());
        assert!(!TestId::Patrol.is_null());
    }

    #[test]
    fn name_returns_correct_value() {
        assert_eq!(TestId::Idle.name(), "Idle");
        assert_eq!(TestId::Patrol.name(), "Patrol");
    }

    #[test]
    fn identifiers_are_ordered() {
        assert!(TestId::Null < TestId::Idle);
        assert!(TestId::Idle < TestId::Patrol);
    }

    #[test]
    fn identifier_serializes_correctly() {
        let json = serde_json::to_string(&TestId::Patrol).unwrap();
        let deserialized: TestId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, TestId::Patrol);
    }

    #[test]
    fn machine_ids_are_unique() {
        let a = MachineId::new();
        let b = MachineId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), a.as_uuid().to_string());
    }
}
