use std::borrow::Cow;

/// Errors raised by typed registry access.
#[vsim_derive::vsim_error]
pub enum RegistryError {
    /// No object is registered under the reference.
    #[error("Object not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The registered object is not of the requested Rust type.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
