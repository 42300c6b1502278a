//! Inventory slice.
//!
//! * [`objects`]: the managed object kinds (`Folder`, `VirtualMachine`, ...) and their shared
//!   [`ManagedEntity`](objects::ManagedEntity) base.
//! * [`records`] and [`status`]: nested data records and wire enums.
//! * [`Model`]: builds the default topology into a registry.
//! * [`power_on`], [`power_off`], [`destroy`]: virtual machine state changes.

mod error;
mod model;
pub mod objects;
mod power;
pub mod records;
pub mod status;

pub use crate::error::{InventoryError, InventoryErrorExt};
pub use crate::model::Model;
pub use crate::power::{destroy, power_off, power_on};

use crate::objects::{
    ClusterComputeResource, ComputeResource, Datacenter, Datastore, Folder, HostSystem, Network, ResourcePool,
    VirtualMachine,
};
use vsim_kernel::{Schema, SchemaError};

/// Schema of every inventory kind; base types are registered along with them.
///
/// # Errors
/// [`SchemaError::Conflict`] if two kinds publish different descriptors under one name.
pub fn schema() -> Result<Schema, SchemaError> {
    Schema::builder()
        .register::<Folder>()
        .register::<Datacenter>()
        .register::<ComputeResource>()
        .register::<ClusterComputeResource>()
        .register::<HostSystem>()
        .register::<ResourcePool>()
        .register::<VirtualMachine>()
        .register::<Datastore>()
        .register::<Network>()
        .build()
}
