//! Virtual machine state changes.
//!
//! Each change is a short exclusive access on the machine, followed by one exclusive access
//! per linked object when references must be unlinked. No two objects are ever locked at the
//! same time. A machine is removed from the registry while its own lock is held, so a state
//! change queued behind a destroy finds it gone.

use crate::error::InventoryError;
use crate::model::now;
use crate::objects::{Datastore, Folder, HostSystem, Network, ResourcePool, Unlink, VirtualMachine};
use crate::status::VirtualMachinePowerState;
use tracing::{info, instrument, warn};
use vsim_domain::ManagedObjectReference;
use vsim_domain::reflect::ManagedObject;
use vsim_registry::{Registry, RegistryError};

/// Powers a machine on.
///
/// # Errors
/// [`InventoryError::InvalidPowerState`] when it is already on, [`InventoryError::Registry`]
/// when `vm` is unknown or not a virtual machine.
#[instrument(skip(registry), fields(vm = %vm))]
pub fn power_on(registry: &Registry, vm: &ManagedObjectReference) -> Result<(), InventoryError> {
    transition(registry, vm, VirtualMachinePowerState::PoweredOn)
}

/// Powers a machine off.
///
/// # Errors
/// [`InventoryError::InvalidPowerState`] when it is already off.
#[instrument(skip(registry), fields(vm = %vm))]
pub fn power_off(registry: &Registry, vm: &ManagedObjectReference) -> Result<(), InventoryError> {
    transition(registry, vm, VirtualMachinePowerState::PoweredOff)
}

fn transition(
    registry: &Registry,
    vm: &ManagedObjectReference,
    target: VirtualMachinePowerState,
) -> Result<(), InventoryError> {
    registry.update::<VirtualMachine, _>(vm, |machine| {
        let runtime = &mut machine.runtime;
        if runtime.power_state == target {
            return Err(invalid_state(vm, target));
        }

        runtime.power_state = target;
        runtime.boot_time = (target == VirtualMachinePowerState::PoweredOn).then(now);
        Ok(())
    })??;

    info!(state = %target, "power state changed");
    Ok(())
}

/// Removes a powered-off machine and every reference to it held by its folder, host,
/// resource pool, datastores and networks.
///
/// # Errors
/// [`InventoryError::InvalidPowerState`] when the machine is powered on.
#[instrument(skip(registry), fields(vm = %vm))]
pub fn destroy(registry: &Registry, vm: &ManagedObjectReference) -> Result<(), InventoryError> {
    let links = registry.update::<VirtualMachine, _>(vm, |machine| {
        if machine.runtime.power_state == VirtualMachinePowerState::PoweredOn {
            return Err(invalid_state(vm, VirtualMachinePowerState::PoweredOn));
        }
        registry.remove(vm);
        Ok(Links {
            folder: machine.entity.parent.clone(),
            host: machine.runtime.host.clone(),
            pool: machine.resource_pool.clone(),
            datastore: machine.datastore.clone(),
            network: machine.network.clone(),
        })
    })??;

    unlink::<Folder>(registry, links.folder.as_ref(), vm)?;
    unlink::<HostSystem>(registry, links.host.as_ref(), vm)?;
    unlink::<ResourcePool>(registry, links.pool.as_ref(), vm)?;
    for datastore in &links.datastore {
        unlink::<Datastore>(registry, Some(datastore), vm)?;
    }
    for network in &links.network {
        unlink::<Network>(registry, Some(network), vm)?;
    }

    info!("virtual machine destroyed");
    Ok(())
}

/// Objects naming a machine, captured before it is removed.
struct Links {
    folder: Option<ManagedObjectReference>,
    host: Option<ManagedObjectReference>,
    pool: Option<ManagedObjectReference>,
    datastore: Vec<ManagedObjectReference>,
    network: Vec<ManagedObjectReference>,
}

/// Drops `vm` from `owner`. Owners removed in the meantime are skipped.
fn unlink<T>(
    registry: &Registry,
    owner: Option<&ManagedObjectReference>,
    vm: &ManagedObjectReference,
) -> Result<(), InventoryError>
where
    T: ManagedObject + Unlink,
{
    let Some(owner) = owner else {
        return Ok(());
    };
    match registry.update::<T, _>(owner, |object| object.unlink(vm)) {
        Ok(()) => Ok(()),
        Err(RegistryError::NotFound { .. }) => {
            warn!(%owner, "linked object already removed");
            Ok(())
        },
        Err(err) => Err(err.into()),
    }
}

fn invalid_state(vm: &ManagedObjectReference, state: VirtualMachinePowerState) -> InventoryError {
    InventoryError::InvalidPowerState { obj: vm.clone(), state: state.as_str().into(), context: None }
}
