use std::borrow::Cow;
use vsim_inventory::InventoryError;
use vsim_kernel::SchemaError;

/// Failures while assembling a simulator.
#[vsim_derive::vsim_error]
pub enum SimulatorError {
    #[error("Schema error{}: {source}", format_context(.context))]
    Schema { source: SchemaError, context: Option<Cow<'static, str>> },

    #[error("Inventory error{}: {source}", format_context(.context))]
    Inventory { source: InventoryError, context: Option<Cow<'static, str>> },
}
