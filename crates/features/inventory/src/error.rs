use std::borrow::Cow;
use vsim_domain::ManagedObjectReference;
use vsim_registry::RegistryError;

#[vsim_derive::vsim_error]
pub enum InventoryError {
    #[error("Registry error{}: {source}", format_context(.context))]
    Registry { source: RegistryError, context: Option<Cow<'static, str>> },

    /// The requested state change does not apply to the machine's current power state.
    #[error("Invalid power state{}: {obj} is {state}", format_context(.context))]
    InvalidPowerState { obj: ManagedObjectReference, state: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
