#![allow(dead_code)]

use vsim_collector::PropertyCollector;
use vsim_derive::{ManagedObject, Reflect};
use vsim_domain::ManagedObjectReference;
use vsim_domain::methods::{ObjectSpec, PropertyFilterSpec, PropertySpec, RetrievePropertiesEx};
use vsim_kernel::Schema;
use vsim_registry::Registry;

/// Minimal folder-like object: a name, an owner and child references.
#[derive(Debug, Default, Reflect, ManagedObject)]
#[reflect(type_name = "Folder")]
pub struct Node {
    #[reflect(reference)]
    pub self_ref: ManagedObjectReference,
    pub name: String,
    pub owner: Option<ManagedObjectReference>,
    pub children: Vec<ManagedObjectReference>,
}

pub fn folder(id: &str) -> ManagedObjectReference {
    ManagedObjectReference::new("Folder", id)
}

pub fn node(id: &str, name: &str, children: &[&str]) -> Node {
    Node {
        self_ref: folder(id),
        name: name.to_owned(),
        owner: None,
        children: children.iter().copied().map(folder).collect(),
    }
}

pub fn collector(registry: &Registry) -> PropertyCollector {
    let schema = Schema::builder().register::<Node>().build().expect("schema");
    PropertyCollector::new(ManagedObjectReference::new("PropertyCollector", "propertyCollector"), registry.clone(), schema)
}

pub fn filter(props: Vec<PropertySpec>, objects: Vec<ObjectSpec>) -> PropertyFilterSpec {
    PropertyFilterSpec { prop_set: props, object_set: objects, report_missing_objects_in_results: None }
}

pub fn request(spec_set: Vec<PropertyFilterSpec>) -> RetrievePropertiesEx {
    RetrievePropertiesEx {
        this: ManagedObjectReference::new("PropertyCollector", "propertyCollector"),
        spec_set,
        options: Default::default(),
    }
}

/// Registry with the default inventory model plus the matching collector.
pub fn inventory() -> (Registry, PropertyCollector) {
    let registry = Registry::new();
    vsim_inventory::Model::build(&registry, "group-d1", &Default::default()).expect("model");
    let schema = vsim_inventory::schema().expect("schema");
    let collector =
        PropertyCollector::new(ManagedObjectReference::new("PropertyCollector", "propertyCollector"), registry.clone(), schema);
    (registry, collector)
}
