use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one managed object: its type name plus an id unique within a registry.
///
/// References are immutable keys. They are hashed into the registry and embedded into the
/// object they name, so two equal references always denote the same simulated entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ManagedObjectReference {
    pub r#type: String,
    pub value: String,
}

impl ManagedObjectReference {
    pub fn new(r#type: impl Into<String>, value: impl Into<String>) -> Self {
        Self { r#type: r#type.into(), value: value.into() }
    }

    /// `true` for the default (unassigned) reference.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.r#type, self.value)
    }
}
