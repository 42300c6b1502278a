//! Data records nested inside managed objects.
//!
//! Records have no identity of their own: they are resolved through dotted paths
//! (`runtime.powerState`, `summary.hardware.numCpuCores`) and sent as data objects.

use crate::status::{
    HostSystemConnectionState, HostSystemPowerState, VirtualMachineConnectionState, VirtualMachinePowerState,
};
use vsim_derive::Reflect;
use vsim_domain::ManagedObjectReference;

#[derive(Debug, Clone, Default, Reflect)]
pub struct OptionValue {
    pub key: String,
    pub value: String,
}

impl OptionValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

// --- Host ---

#[derive(Debug, Clone, Default, Reflect)]
pub struct HostRuntimeInfo {
    pub connection_state: HostSystemConnectionState,
    pub power_state: HostSystemPowerState,
    pub in_maintenance_mode: bool,
    pub boot_time: Option<String>,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct HostHardwareSummary {
    pub vendor: String,
    pub model: String,
    pub uuid: String,
    pub memory_size: i64,
    pub cpu_mhz: i32,
    pub num_cpu_cores: i32,
    pub num_cpu_threads: i32,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct HostConfigSummary {
    pub name: String,
    pub port: i32,
    pub vmotion_enabled: bool,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct HostListSummary {
    pub host: Option<ManagedObjectReference>,
    #[reflect(record)]
    pub hardware: HostHardwareSummary,
    #[reflect(record)]
    pub config: HostConfigSummary,
}

// --- Virtual machine ---

#[derive(Debug, Clone, Default, Reflect)]
pub struct VirtualMachineRuntimeInfo {
    pub host: Option<ManagedObjectReference>,
    pub connection_state: VirtualMachineConnectionState,
    pub power_state: VirtualMachinePowerState,
    pub boot_time: Option<String>,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct VirtualHardware {
    pub num_cpu: i32,
    pub num_cores_per_socket: i32,
    #[reflect(rename = "memoryMB")]
    pub memory_mb: i32,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct VirtualMachineConfigInfo {
    pub name: String,
    pub guest_id: String,
    pub guest_full_name: String,
    pub uuid: String,
    pub instance_uuid: String,
    pub template: bool,
    #[reflect(record)]
    pub hardware: VirtualHardware,
    #[reflect(record)]
    pub extra_config: Vec<OptionValue>,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct VirtualMachineConfigSummary {
    pub name: String,
    pub template: bool,
    pub guest_id: String,
    #[reflect(rename = "memorySizeMB")]
    pub memory_size_mb: i32,
    pub num_cpu: i32,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct VirtualMachineSummary {
    pub vm: Option<ManagedObjectReference>,
    #[reflect(record)]
    pub config: VirtualMachineConfigSummary,
}

// --- Compute ---

#[derive(Debug, Clone, Default, Reflect)]
pub struct ComputeResourceSummary {
    pub total_cpu: i32,
    pub total_memory: i64,
    pub num_cpu_cores: i32,
    pub num_hosts: i32,
    pub num_effective_hosts: i32,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct ClusterDrsConfigInfo {
    pub enabled: bool,
    pub default_vm_behavior: String,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct ClusterDasConfigInfo {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct ClusterConfigInfo {
    #[reflect(record)]
    pub drs_config: ClusterDrsConfigInfo,
    #[reflect(record)]
    pub das_config: ClusterDasConfigInfo,
}

// --- Storage and network ---

#[derive(Debug, Clone, Default, Reflect)]
pub struct DatastoreSummary {
    pub datastore: Option<ManagedObjectReference>,
    pub name: String,
    pub url: String,
    pub capacity: i64,
    pub free_space: i64,
    pub r#type: String,
    pub accessible: bool,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct NetworkSummary {
    pub network: Option<ManagedObjectReference>,
    pub name: String,
    pub accessible: bool,
}
