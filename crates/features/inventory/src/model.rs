//! Default inventory topology.
//!
//! Mirrors the layout of a freshly installed manager, named the way simulators name it:
//!
//! ```text
//! Datacenters (root folder)
//! └── DC0
//!     ├── vm/            DC0_H0_VM0, DC0_C0_RP0_VM0, ...
//!     ├── host/          DC0_H0 (standalone), DC0_C0 (cluster: DC0_C0_H0, ...)
//!     ├── datastore/     LocalDS_0, ...
//!     └── network/       VM Network
//! ```
//!
//! Every child is linked both ways: `parent` on the child, the child list on the parent.

use crate::error::InventoryError;
use crate::objects::{
    ClusterComputeResource, ComputeResource, Datacenter, Datastore, Folder, HostSystem, ManagedEntity, Network,
    ResourcePool, VirtualMachine,
};
use crate::records::{
    ClusterConfigInfo, ClusterDasConfigInfo, ClusterDrsConfigInfo, ComputeResourceSummary, DatastoreSummary,
    HostConfigSummary, HostHardwareSummary, HostListSummary, HostRuntimeInfo, NetworkSummary, OptionValue,
    VirtualHardware, VirtualMachineConfigInfo, VirtualMachineConfigSummary, VirtualMachineRuntimeInfo,
    VirtualMachineSummary,
};
use crate::status::{
    HostSystemConnectionState, HostSystemPowerState, ManagedEntityStatus, VirtualMachineConnectionState,
    VirtualMachinePowerState,
};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};
use vsim_domain::ManagedObjectReference;
use vsim_domain::config::ModelConfig;
use vsim_registry::Registry;

const HOST_MEMORY: i64 = 4 * 1024 * 1024 * 1024;
const HOST_CPU_MHZ: i32 = 2294;
const HOST_CPU_CORES: i32 = 2;
const DATASTORE_CAPACITY: i64 = 1024 * 1024 * 1024 * 1024;
const VM_MEMORY_MB: i32 = 32;
const VM_GUEST_ID: &str = "otherGuest";

/// References of the generated entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub root_folder: ManagedObjectReference,
    pub datacenters: Vec<ManagedObjectReference>,
}

impl Model {
    /// Populates `registry` with the topology described by `config`, rooted at a folder with
    /// id `root_folder`.
    ///
    /// # Errors
    /// [`InventoryError::Registry`] if an object vanishes while it is being linked.
    pub fn build(registry: &Registry, root_folder: &str, config: &ModelConfig) -> Result<Self, InventoryError> {
        let builder = Builder { registry, config };
        let root = ManagedObjectReference::new("Folder", root_folder);
        registry.put_as(
            root.clone(),
            Folder::new(ManagedEntity::new(root.clone(), "Datacenters", None), &["Folder", "Datacenter"]),
        );

        let datacenters = (0..config.datacenter)
            .map(|index| builder.datacenter(&root, index))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            datacenters = datacenters.len(),
            hosts = registry.references(Some("HostSystem")).len(),
            machines = registry.references(Some("VirtualMachine")).len(),
            objects = registry.len(),
            "inventory model built"
        );
        Ok(Self { root_folder: root, datacenters })
    }
}

/// Where a new virtual machine lands.
struct Placement<'p> {
    folder: &'p ManagedObjectReference,
    host: Option<&'p ManagedObjectReference>,
    pool: &'p ManagedObjectReference,
    datastore: &'p [ManagedObjectReference],
    network: &'p [ManagedObjectReference],
}

/// Shared resources of one datacenter.
struct Site {
    name: String,
    vm_folder: ManagedObjectReference,
    host_folder: ManagedObjectReference,
    datastore: Vec<ManagedObjectReference>,
    network: Vec<ManagedObjectReference>,
}

struct Builder<'a> {
    registry: &'a Registry,
    config: &'a ModelConfig,
}

impl Builder<'_> {
    fn datacenter(&self, root: &ManagedObjectReference, index: usize) -> Result<ManagedObjectReference, InventoryError> {
        let name = format!("DC{index}");
        let reference = self.registry.new_reference("Datacenter");
        let parent = Some(&reference);

        let vm_folder = self.folder("vm", parent, &["Folder", "VirtualMachine", "VirtualApp"]);
        let host_folder = self.folder("host", parent, &["Folder", "ComputeResource"]);
        let datastore_folder = self.folder("datastore", parent, &["Folder", "Datastore", "StoragePod"]);
        let network_folder = self.folder("network", parent, &["Folder", "Network", "DistributedVirtualSwitch"]);

        let network = vec![self.network("VM Network", &network_folder)?];
        let datastore = (0..self.config.datastore)
            .map(|i| self.datastore(&format!("LocalDS_{i}"), &datastore_folder))
            .collect::<Result<Vec<_>, _>>()?;

        self.registry.put(Datacenter {
            entity: ManagedEntity::new(reference.clone(), name.as_str(), Some(root.clone())),
            vm_folder: vm_folder.clone(),
            host_folder: host_folder.clone(),
            datastore_folder,
            network_folder,
            datastore: datastore.clone(),
            network: network.clone(),
        });
        self.attach(root, &reference)?;

        let site = Site { name, vm_folder, host_folder, datastore, network };
        for h in 0..self.config.host {
            self.standalone_host(&site, h)?;
        }
        for c in 0..self.config.cluster {
            self.cluster(&site, c)?;
        }

        debug!(%reference, name = %site.name, "datacenter built");
        Ok(reference)
    }

    fn folder(&self, name: &str, parent: Option<&ManagedObjectReference>, child_type: &[&str]) -> ManagedObjectReference {
        let reference = self.registry.new_reference("Folder");
        let entity = ManagedEntity::new(reference.clone(), name, parent.cloned());
        self.registry.put(Folder::new(entity, child_type))
    }

    /// Appends `child` to the child list of `folder`.
    fn attach(&self, folder: &ManagedObjectReference, child: &ManagedObjectReference) -> Result<(), InventoryError> {
        self.registry.update::<Folder, _>(folder, |f| f.child_entity.push(child.clone()))?;
        Ok(())
    }

    fn network(&self, name: &str, folder: &ManagedObjectReference) -> Result<ManagedObjectReference, InventoryError> {
        let reference = self.registry.new_reference("Network");
        self.registry.put(Network {
            entity: ManagedEntity::new(reference.clone(), name, Some(folder.clone())),
            summary: NetworkSummary { network: Some(reference.clone()), name: name.to_owned(), accessible: true },
            host: Vec::new(),
            vm: Vec::new(),
        });
        self.attach(folder, &reference)?;
        Ok(reference)
    }

    fn datastore(&self, name: &str, folder: &ManagedObjectReference) -> Result<ManagedObjectReference, InventoryError> {
        let reference = self.registry.new_reference("Datastore");
        self.registry.put(Datastore {
            entity: ManagedEntity::new(reference.clone(), name, Some(folder.clone())),
            summary: DatastoreSummary {
                datastore: Some(reference.clone()),
                name: name.to_owned(),
                url: format!("ds:///vmfs/volumes/{}/", reference.value),
                capacity: DATASTORE_CAPACITY,
                free_space: DATASTORE_CAPACITY,
                r#type: "OTHER".to_owned(),
                accessible: true,
            },
            vm: Vec::new(),
        });
        self.attach(folder, &reference)?;
        Ok(reference)
    }

    fn standalone_host(&self, site: &Site, index: usize) -> Result<(), InventoryError> {
        let name = format!("{}_H{index}", site.name);
        let compute = self.registry.new_reference("ComputeResource");

        let host = self.host(&name, &compute, site)?;
        let pool = self.pool(&compute)?;
        self.registry.put(ComputeResource {
            entity: ManagedEntity::new(compute.clone(), name.as_str(), Some(site.host_folder.clone())),
            resource_pool: Some(pool.clone()),
            host: vec![host.clone()],
            datastore: site.datastore.clone(),
            network: site.network.clone(),
            summary: compute_summary(1),
        });
        self.attach(&site.host_folder, &compute)?;

        for m in 0..self.config.machine {
            let placement = Placement {
                folder: &site.vm_folder,
                host: Some(&host),
                pool: &pool,
                datastore: &site.datastore,
                network: &site.network,
            };
            self.machine(&format!("{name}_VM{m}"), &placement)?;
        }
        Ok(())
    }

    fn cluster(&self, site: &Site, index: usize) -> Result<(), InventoryError> {
        let name = format!("{}_C{index}", site.name);
        let cluster = self.registry.new_reference("ClusterComputeResource");

        let hosts = (0..self.config.cluster_host)
            .map(|h| self.host(&format!("{name}_H{h}"), &cluster, site))
            .collect::<Result<Vec<_>, _>>()?;
        let pool = self.pool(&cluster)?;

        let summary = compute_summary(i32::try_from(hosts.len()).unwrap_or(i32::MAX));
        self.registry.put(ClusterComputeResource {
            compute: ComputeResource {
                entity: ManagedEntity::new(cluster.clone(), name.as_str(), Some(site.host_folder.clone())),
                resource_pool: Some(pool.clone()),
                host: hosts.clone(),
                datastore: site.datastore.clone(),
                network: site.network.clone(),
                summary,
            },
            configuration: ClusterConfigInfo {
                drs_config: ClusterDrsConfigInfo { enabled: true, default_vm_behavior: "fullyAutomated".to_owned() },
                das_config: ClusterDasConfigInfo { enabled: false },
            },
        });
        self.attach(&site.host_folder, &cluster)?;

        for m in 0..self.config.machine {
            let placement = Placement {
                folder: &site.vm_folder,
                host: (!hosts.is_empty()).then(|| &hosts[m % hosts.len()]),
                pool: &pool,
                datastore: &site.datastore,
                network: &site.network,
            };
            self.machine(&format!("{name}_RP0_VM{m}"), &placement)?;
        }
        Ok(())
    }

    fn host(
        &self,
        name: &str,
        compute: &ManagedObjectReference,
        site: &Site,
    ) -> Result<ManagedObjectReference, InventoryError> {
        let reference = self.registry.new_reference("HostSystem");
        self.registry.put(HostSystem {
            entity: ManagedEntity::new(reference.clone(), name, Some(compute.clone())),
            runtime: HostRuntimeInfo {
                connection_state: HostSystemConnectionState::Connected,
                power_state: HostSystemPowerState::PoweredOn,
                in_maintenance_mode: false,
                boot_time: Some(now()),
            },
            summary: HostListSummary {
                host: Some(reference.clone()),
                hardware: HostHardwareSummary {
                    vendor: "VMware, Inc. (vcsim)".to_owned(),
                    model: "VMware Virtual Platform".to_owned(),
                    uuid: uuid(&reference),
                    memory_size: HOST_MEMORY,
                    cpu_mhz: HOST_CPU_MHZ,
                    num_cpu_cores: HOST_CPU_CORES,
                    num_cpu_threads: HOST_CPU_CORES,
                },
                config: HostConfigSummary { name: name.to_owned(), port: 443, vmotion_enabled: false },
            },
            vm: Vec::new(),
            datastore: site.datastore.clone(),
            network: site.network.clone(),
        });

        for network in &site.network {
            self.registry.update::<Network, _>(network, |n| n.host.push(reference.clone()))?;
        }
        Ok(reference)
    }

    fn pool(&self, owner: &ManagedObjectReference) -> Result<ManagedObjectReference, InventoryError> {
        let reference = self.registry.new_reference("ResourcePool");
        Ok(self.registry.put(ResourcePool {
            entity: ManagedEntity::new(reference, "Resources", Some(owner.clone())),
            owner: Some(owner.clone()),
            resource_pool: Vec::new(),
            vm: Vec::new(),
        }))
    }

    fn machine(&self, name: &str, placement: &Placement<'_>) -> Result<ManagedObjectReference, InventoryError> {
        let reference = self.registry.new_reference("VirtualMachine");
        let powered_on = self.config.autostart;

        self.registry.put(VirtualMachine {
            entity: ManagedEntity::new(reference.clone(), name, Some(placement.folder.clone())),
            runtime: VirtualMachineRuntimeInfo {
                host: placement.host.cloned(),
                connection_state: VirtualMachineConnectionState::Connected,
                power_state: if powered_on {
                    VirtualMachinePowerState::PoweredOn
                } else {
                    VirtualMachinePowerState::PoweredOff
                },
                boot_time: powered_on.then(now),
            },
            config: Some(VirtualMachineConfigInfo {
                name: name.to_owned(),
                guest_id: VM_GUEST_ID.to_owned(),
                guest_full_name: "Other (32-bit)".to_owned(),
                uuid: uuid(&reference),
                instance_uuid: uuid(&ManagedObjectReference::new(name, reference.value.as_str())),
                template: false,
                hardware: VirtualHardware { num_cpu: 1, num_cores_per_socket: 1, memory_mb: VM_MEMORY_MB },
                extra_config: vec![OptionValue::new("govcsim", "TRUE")],
            }),
            summary: VirtualMachineSummary {
                vm: Some(reference.clone()),
                config: VirtualMachineConfigSummary {
                    name: name.to_owned(),
                    template: false,
                    guest_id: VM_GUEST_ID.to_owned(),
                    memory_size_mb: VM_MEMORY_MB,
                    num_cpu: 1,
                },
            },
            resource_pool: Some(placement.pool.clone()),
            datastore: placement.datastore.to_vec(),
            network: placement.network.to_vec(),
            guest_heartbeat_status: ManagedEntityStatus::Gray,
        });

        self.attach(placement.folder, &reference)?;
        if let Some(host) = placement.host {
            self.registry.update::<HostSystem, _>(host, |h| h.vm.push(reference.clone()))?;
        }
        self.registry.update::<ResourcePool, _>(placement.pool, |p| p.vm.push(reference.clone()))?;
        for datastore in placement.datastore {
            self.registry.update::<Datastore, _>(datastore, |d| d.vm.push(reference.clone()))?;
        }
        for network in placement.network {
            self.registry.update::<Network, _>(network, |n| n.vm.push(reference.clone()))?;
        }
        Ok(reference)
    }
}

fn compute_summary(hosts: i32) -> ComputeResourceSummary {
    ComputeResourceSummary {
        total_cpu: hosts * HOST_CPU_MHZ * HOST_CPU_CORES,
        total_memory: i64::from(hosts) * HOST_MEMORY,
        num_cpu_cores: hosts * HOST_CPU_CORES,
        num_hosts: hosts,
        num_effective_hosts: hosts,
    }
}

/// Current time in the protocol's `dateTime` form.
pub(crate) fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Stable, uuid-shaped identifier derived from a reference.
fn uuid(reference: &ManagedObjectReference) -> String {
    let high = fxhash::hash64(reference);
    let low = fxhash::hash64(&(reference, VM_GUEST_ID));
    format!(
        "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
        high >> 32,
        (high >> 16) & 0xffff,
        high & 0xffff,
        low >> 48,
        low & 0xffff_ffff_ffff
    )
}
