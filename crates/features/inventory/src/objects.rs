//! Managed object kinds of the simulated inventory.
//!
//! Every kind embeds [`ManagedEntity`], which owns the self reference, so the generic
//! `ManagedEntity` property specs apply to all of them. [`ClusterComputeResource`] embeds
//! [`ComputeResource`] and therefore matches both base types.

use crate::records::{
    ClusterConfigInfo, ComputeResourceSummary, DatastoreSummary, HostListSummary, HostRuntimeInfo, NetworkSummary,
    VirtualMachineConfigInfo, VirtualMachineRuntimeInfo, VirtualMachineSummary,
};
use crate::status::ManagedEntityStatus;
use vsim_derive::{ManagedObject, Reflect};
use vsim_domain::ManagedObjectReference;

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct ManagedEntity {
    #[reflect(reference)]
    pub self_ref: ManagedObjectReference,
    pub name: String,
    pub parent: Option<ManagedObjectReference>,
    pub overall_status: ManagedEntityStatus,
    pub config_status: ManagedEntityStatus,
    pub disabled_method: Vec<String>,
    pub alarm_actions_enabled: bool,
}

impl ManagedEntity {
    pub fn new(
        self_ref: ManagedObjectReference,
        name: impl Into<String>,
        parent: Option<ManagedObjectReference>,
    ) -> Self {
        Self {
            self_ref,
            name: name.into(),
            parent,
            overall_status: ManagedEntityStatus::Green,
            config_status: ManagedEntityStatus::Green,
            disabled_method: Vec::new(),
            alarm_actions_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct Folder {
    #[reflect(embed)]
    pub entity: ManagedEntity,
    pub child_type: Vec<String>,
    pub child_entity: Vec<ManagedObjectReference>,
}

impl Folder {
    pub fn new(entity: ManagedEntity, child_type: &[&str]) -> Self {
        Self {
            entity,
            child_type: child_type.iter().map(|t| (*t).to_owned()).collect(),
            child_entity: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct Datacenter {
    #[reflect(embed)]
    pub entity: ManagedEntity,
    pub vm_folder: ManagedObjectReference,
    pub host_folder: ManagedObjectReference,
    pub datastore_folder: ManagedObjectReference,
    pub network_folder: ManagedObjectReference,
    pub datastore: Vec<ManagedObjectReference>,
    pub network: Vec<ManagedObjectReference>,
}

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct ComputeResource {
    #[reflect(embed)]
    pub entity: ManagedEntity,
    pub resource_pool: Option<ManagedObjectReference>,
    pub host: Vec<ManagedObjectReference>,
    pub datastore: Vec<ManagedObjectReference>,
    pub network: Vec<ManagedObjectReference>,
    #[reflect(record)]
    pub summary: ComputeResourceSummary,
}

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct ClusterComputeResource {
    #[reflect(embed)]
    pub compute: ComputeResource,
    #[reflect(record)]
    pub configuration: ClusterConfigInfo,
}

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct HostSystem {
    #[reflect(embed)]
    pub entity: ManagedEntity,
    #[reflect(record)]
    pub runtime: HostRuntimeInfo,
    #[reflect(record)]
    pub summary: HostListSummary,
    pub vm: Vec<ManagedObjectReference>,
    pub datastore: Vec<ManagedObjectReference>,
    pub network: Vec<ManagedObjectReference>,
}

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct ResourcePool {
    #[reflect(embed)]
    pub entity: ManagedEntity,
    pub owner: Option<ManagedObjectReference>,
    pub resource_pool: Vec<ManagedObjectReference>,
    pub vm: Vec<ManagedObjectReference>,
}

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct VirtualMachine {
    #[reflect(embed)]
    pub entity: ManagedEntity,
    #[reflect(record)]
    pub runtime: VirtualMachineRuntimeInfo,
    #[reflect(record)]
    pub config: Option<VirtualMachineConfigInfo>,
    #[reflect(record)]
    pub summary: VirtualMachineSummary,
    pub resource_pool: Option<ManagedObjectReference>,
    pub datastore: Vec<ManagedObjectReference>,
    pub network: Vec<ManagedObjectReference>,
    pub guest_heartbeat_status: ManagedEntityStatus,
}

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct Datastore {
    #[reflect(embed)]
    pub entity: ManagedEntity,
    #[reflect(record)]
    pub summary: DatastoreSummary,
    pub vm: Vec<ManagedObjectReference>,
}

#[derive(Debug, Clone, Default, Reflect, ManagedObject)]
pub struct Network {
    #[reflect(embed)]
    pub entity: ManagedEntity,
    #[reflect(record)]
    pub summary: NetworkSummary,
    pub host: Vec<ManagedObjectReference>,
    pub vm: Vec<ManagedObjectReference>,
}

/// Unlinking a removed object from the lists that name it.
pub(crate) trait Unlink {
    fn unlink(&mut self, reference: &ManagedObjectReference);
}

fn drop_from(list: &mut Vec<ManagedObjectReference>, reference: &ManagedObjectReference) {
    list.retain(|r| r != reference);
}

impl Unlink for Folder {
    fn unlink(&mut self, reference: &ManagedObjectReference) {
        drop_from(&mut self.child_entity, reference);
    }
}

impl Unlink for HostSystem {
    fn unlink(&mut self, reference: &ManagedObjectReference) {
        drop_from(&mut self.vm, reference);
    }
}

impl Unlink for ResourcePool {
    fn unlink(&mut self, reference: &ManagedObjectReference) {
        drop_from(&mut self.vm, reference);
        drop_from(&mut self.resource_pool, reference);
    }
}

impl Unlink for Datastore {
    fn unlink(&mut self, reference: &ManagedObjectReference) {
        drop_from(&mut self.vm, reference);
    }
}

impl Unlink for Network {
    fn unlink(&mut self, reference: &ManagedObjectReference) {
        drop_from(&mut self.vm, reference);
        drop_from(&mut self.host, reference);
    }
}
