use std::borrow::Cow;
use vsim_domain::ManagedObjectReference;

/// Why a property path produced no value.
#[vsim_derive::vsim_error]
#[derive(PartialEq, Eq)]
pub enum ResolveError {
    /// A path segment names no field of the record (schema error).
    #[error("Missing field{}: {path}", format_context(.context))]
    MissingField { path: String, context: Option<Cow<'static, str>> },

    /// The field exists but holds its empty value (legitimate absence).
    #[error("Empty field{}: {path}", format_context(.context))]
    EmptyField { path: String, context: Option<Cow<'static, str>> },
}

pub use collector_error::{CollectorError, CollectorErrorExt};

// Separate module so the per-enum `format_context` helper emitted by
// `vsim_error` does not collide with the one generated for `ResolveError`.
mod collector_error {
    use super::{Cow, ManagedObjectReference};

    /// Failures that abort a whole retrieval.
    #[vsim_derive::vsim_error]
    pub enum CollectorError {
        #[error("Object not found{}: {obj}", format_context(.context))]
        ObjectNotFound { obj: ManagedObjectReference, context: Option<Cow<'static, str>> },
    }
}
