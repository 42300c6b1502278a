use crate::reference::ManagedObjectReference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured protocol fault. Faults are data returned to the caller, never panics or
/// transport errors, so clients can branch on the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_typeName")]
pub enum MethodFault {
    /// A referenced object is not present in the registry.
    ManagedObjectNotFound { obj: ManagedObjectReference },
    /// A property path does not exist on the object's schema.
    InvalidProperty { name: String },
}

impl MethodFault {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ManagedObjectNotFound { .. } => "ManagedObjectNotFound",
            Self::InvalidProperty { .. } => "InvalidProperty",
        }
    }
}

impl fmt::Display for MethodFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManagedObjectNotFound { obj } => {
                write!(f, "The object '{obj}' has already been deleted or has not been completely created")
            },
            Self::InvalidProperty { name } => write!(f, "Invalid property: {name}"),
        }
    }
}

/// A fault together with its human-readable message, as carried in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedMethodFault {
    pub fault: MethodFault,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_message: Option<String>,
}

impl From<MethodFault> for LocalizedMethodFault {
    fn from(fault: MethodFault) -> Self {
        let localized_message = Some(fault.to_string());
        Self { fault, localized_message }
    }
}
