//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Name used when the host does not configure one.
pub const DEFAULT_MACHINE_NAME: &str = "fsm";

/// Settings shared by both machine variants.
///
/// Deserializable so hosts can keep it alongside their own configuration;
/// missing fields take their defaults.
///
/// # Example
///
/// ```rust
/// use brainstem::machine::MachineConfig;
///
/// let config: MachineConfig =
///     serde_json::from_str(r#"{ "name": "guard-ai", "history_limit": 32 }"#).unwrap();
///
/// assert_eq!(config.name, "guard-ai");
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(32));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name attached to every diagnostic event
    pub name: String,

    /// Whether completed transitions are recorded
    pub record_history: bool,

    /// Maximum number of retained history records
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MACHINE_NAME.to_string(),
            record_history: true,
            history_limit: None,
        }
    }
}

impl MachineConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
