mod fixtures;

use fixtures::{collector, filter, folder, inventory, node, request};
use vsim_domain::methods::{ObjectSpec, PropertySpec, RetrieveProperties, TraversalSpec};
use vsim_domain::{ManagedObjectReference, MethodFault, Value};
use vsim_registry::Registry;

fn ids(objects: &[vsim_domain::methods::ObjectContent]) -> Vec<&str> {
    objects.iter().map(|o| o.obj.value.as_str()).collect()
}

#[test]
fn unset_property_is_empty_not_missing() {
    let registry = Registry::new();
    registry.put(node("F1", "", &[]));

    let req = request(vec![filter(vec![PropertySpec::paths("Folder", ["name"])], vec![ObjectSpec::new(folder("F1"))])]);
    let result = collector(&registry).retrieve_properties_ex(&req).unwrap();

    assert_eq!(result.objects.len(), 1);
    assert_eq!(result.objects[0].obj, folder("F1"));
    assert!(result.objects[0].prop_set.is_empty());
    assert!(result.objects[0].missing_set.is_empty());
}

#[test]
fn unknown_path_is_reported_as_missing_property() {
    let registry = Registry::new();
    registry.put(node("F1", "", &[]));

    let req = request(vec![filter(
        vec![PropertySpec::paths("Folder", ["bogusField"])],
        vec![ObjectSpec::new(folder("F1"))],
    )]);
    let result = collector(&registry).retrieve_properties_ex(&req).unwrap();

    let missing = &result.objects[0].missing_set;
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].path, "bogusField");
    assert_eq!(missing[0].fault.fault, MethodFault::InvalidProperty { name: "bogusField".to_owned() });
}

#[test]
fn recursive_traversal_visits_each_object_of_a_cycle_once() {
    let registry = Registry::new();
    registry.put(node("A", "a", &["B", "C"]));
    registry.put(node("B", "b", &["A"]));
    registry.put(node("C", "c", &[]));

    let req = request(vec![filter(
        vec![PropertySpec::paths("Folder", ["name", "children"])],
        vec![ObjectSpec::new(folder("A")).select(TraversalSpec::recursive("children"))],
    )]);
    let result = collector(&registry).retrieve_properties_ex(&req).unwrap();

    assert_eq!(ids(&result.objects), ["A", "B", "C"]);
    assert_eq!(result.objects[1].property("name").map(|p| &p.val), Some(&Value::from("b")));
}

#[test]
fn recursive_traversal_emits_depth_first_pre_order() {
    let registry = Registry::new();
    registry.put(node("A", "a", &["B", "C"]));
    registry.put(node("B", "b", &["D"]));
    registry.put(node("C", "c", &[]));
    registry.put(node("D", "d", &[]));

    let req = request(vec![filter(
        vec![PropertySpec::paths("Folder", ["children"])],
        vec![ObjectSpec::new(folder("A")).select(TraversalSpec::recursive("children"))],
    )]);
    let result = collector(&registry).retrieve_properties_ex(&req).unwrap();

    assert_eq!(ids(&result.objects), ["A", "B", "D", "C"]);
}

#[test]
fn each_root_is_walked_before_the_next_one() {
    let registry = Registry::new();
    registry.put(node("R1", "r1", &["X1"]));
    registry.put(node("X1", "x1", &["Y1"]));
    registry.put(node("Y1", "y1", &[]));
    registry.put(node("R2", "r2", &["X2"]));
    registry.put(node("X2", "x2", &[]));

    let walk = |root: &str| ObjectSpec::new(folder(root)).select(TraversalSpec::recursive("children"));
    let req = request(vec![filter(vec![PropertySpec::paths("Folder", ["children"])], vec![walk("R1"), walk("R2")])]);
    let result = collector(&registry).retrieve_properties_ex(&req).unwrap();

    assert_eq!(ids(&result.objects), ["R1", "X1", "Y1", "R2", "X2"]);
}

#[test]
fn missing_root_fails_the_call() {
    let registry = Registry::new();
    let req = request(vec![filter(vec![PropertySpec::all("Folder")], vec![ObjectSpec::new(folder("ghost"))])]);

    let err = collector(&registry).retrieve_properties_ex(&req).unwrap_err();
    assert_eq!(err, MethodFault::ManagedObjectNotFound { obj: folder("ghost") });
}

#[test]
fn missing_root_is_skipped_when_reported_in_results() {
    let registry = Registry::new();
    registry.put(node("F1", "one", &[]));

    let mut spec = filter(
        vec![PropertySpec::all("Folder")],
        vec![ObjectSpec::new(folder("ghost")), ObjectSpec::new(folder("F1"))],
    );
    spec.report_missing_objects_in_results = Some(true);
    let result = collector(&registry).retrieve_properties_ex(&request(vec![spec])).unwrap();

    assert_eq!(ids(&result.objects), ["F1"]);
}

#[test]
fn missing_descendant_uses_the_filter_flag() {
    let registry = Registry::new();
    registry.put(node("A", "a", &["ghost", "B"]));
    registry.put(node("B", "b", &[]));

    let objects = vec![ObjectSpec::new(folder("A")).select(TraversalSpec::new("children"))];
    let strict = filter(vec![PropertySpec::paths("Folder", ["name"])], objects.clone());
    let err = collector(&registry).retrieve_properties_ex(&request(vec![strict])).unwrap_err();
    assert_eq!(err, MethodFault::ManagedObjectNotFound { obj: folder("ghost") });

    let mut lenient = filter(vec![PropertySpec::paths("Folder", ["name"])], objects);
    lenient.report_missing_objects_in_results = Some(true);
    let result = collector(&registry).retrieve_properties_ex(&request(vec![lenient])).unwrap();
    assert_eq!(ids(&result.objects), ["A", "B"]);
}

#[test]
fn skip_only_applies_with_traversal_steps() {
    let registry = Registry::new();
    registry.put(node("A", "a", &["B"]));
    registry.put(node("B", "b", &[]));
    let props = || vec![PropertySpec::paths("Folder", ["name"])];

    let walk = ObjectSpec::new(folder("A")).skip(true).select(TraversalSpec::new("children"));
    let result = collector(&registry).retrieve_properties_ex(&request(vec![filter(props(), vec![walk])])).unwrap();
    assert_eq!(ids(&result.objects), ["B"]);

    let alone = ObjectSpec::new(folder("A")).skip(true);
    let result = collector(&registry).retrieve_properties_ex(&request(vec![filter(props(), vec![alone])])).unwrap();
    assert_eq!(ids(&result.objects), ["A"]);
}

#[test]
fn single_hop_traversal_does_not_expand() {
    let registry = Registry::new();
    registry.put(node("A", "a", &["B"]));
    registry.put(node("B", "b", &["C"]));
    registry.put(node("C", "c", &[]));

    let req = request(vec![filter(
        vec![PropertySpec::paths("Folder", ["children"])],
        vec![ObjectSpec::new(folder("A")).select(TraversalSpec::new("children"))],
    )]);
    let result = collector(&registry).retrieve_properties_ex(&req).unwrap();
    assert_eq!(ids(&result.objects), ["A", "B"]);
}

#[test]
fn non_reference_traversal_path_yields_no_targets() {
    let registry = Registry::new();
    registry.put(node("A", "a", &["B"]));
    registry.put(node("B", "b", &[]));

    let req = request(vec![filter(
        vec![PropertySpec::paths("Folder", ["name"])],
        vec![ObjectSpec::new(folder("A")).select(TraversalSpec::recursive("name")).select(TraversalSpec::new("nope"))],
    )]);
    let result = collector(&registry).retrieve_properties_ex(&req).unwrap();
    assert_eq!(ids(&result.objects), ["A"]);
}

#[test]
fn unmatched_type_still_lists_the_object() {
    let registry = Registry::new();
    registry.put(node("A", "a", &[]));

    let req = request(vec![filter(vec![PropertySpec::all("Datastore")], vec![ObjectSpec::new(folder("A"))])]);
    let result = collector(&registry).retrieve_properties_ex(&req).unwrap();

    assert_eq!(result.objects.len(), 1);
    assert!(result.objects[0].prop_set.is_empty());
}

#[test]
fn objects_are_collected_once_across_filters() {
    let registry = Registry::new();
    registry.put(node("A", "a", &[]));
    let spec = || filter(vec![PropertySpec::paths("Folder", ["name"])], vec![ObjectSpec::new(folder("A"))]);

    let result = collector(&registry).retrieve_properties_ex(&request(vec![spec(), spec()])).unwrap();
    assert_eq!(ids(&result.objects), ["A"]);
}

#[test]
fn all_properties_skip_empty_values() {
    let registry = Registry::new();
    registry.put(node("A", "a", &[]));

    let req = request(vec![filter(vec![PropertySpec::all("Folder")], vec![ObjectSpec::new(folder("A"))])]);
    let result = collector(&registry).retrieve_properties_ex(&req).unwrap();

    let names: Vec<_> = result.objects[0].prop_set.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["name"]);
}

#[test]
fn legacy_call_matches_current_call() {
    let registry = Registry::new();
    registry.put(node("A", "a", &["B", "ghost"]));
    registry.put(node("B", "b", &["A"]));

    let mut spec = filter(
        vec![PropertySpec::paths("Folder", ["name", "children", "bogus"])],
        vec![ObjectSpec::new(folder("A")).select(TraversalSpec::recursive("children"))],
    );
    spec.report_missing_objects_in_results = Some(true);
    let current = request(vec![spec]);
    let legacy = RetrieveProperties { this: current.this.clone(), spec_set: current.spec_set.clone() };

    let collector = collector(&registry);
    let expected = collector.retrieve_properties_ex(&current).unwrap().objects;
    assert_eq!(collector.retrieve_properties(&legacy).unwrap(), expected);
}

#[test]
fn base_type_spec_matches_every_entity() {
    let (_, collector) = inventory();

    let props = vec![
        PropertySpec::paths("ManagedEntity", ["name"]),
        PropertySpec::paths("Folder", ["childEntity"]),
        PropertySpec::paths("Datacenter", ["vmFolder", "hostFolder"]),
        PropertySpec::paths("ComputeResource", ["host"]),
    ];
    let root = ObjectSpec::new(ManagedObjectReference::new("Folder", "group-d1"))
        .select(TraversalSpec::recursive("childEntity"))
        .select(TraversalSpec::recursive("vmFolder"))
        .select(TraversalSpec::recursive("hostFolder"))
        .select(TraversalSpec::recursive("host"));
    let result = collector.retrieve_properties_ex(&request(vec![filter(props, vec![root])])).unwrap();

    let count = |kind: &str| result.objects.iter().filter(|o| o.obj.r#type == kind).count();
    assert_eq!(result.objects.len(), 14);
    assert_eq!(count("VirtualMachine"), 4);
    assert_eq!(count("HostSystem"), 4, "cluster hosts are reached through the ComputeResource base");
    assert_eq!(count("ClusterComputeResource"), 1);
    assert!(result.objects.iter().all(|o| o.property("name").is_some()));
    assert_eq!(result.objects[0].obj.value, "group-d1");
}

#[test]
fn nested_and_renamed_paths_resolve_on_inventory_objects() {
    let (registry, collector) = inventory();
    let vm = registry.references(Some("VirtualMachine")).remove(0);

    let props = vec![PropertySpec::paths(
        "VirtualMachine",
        ["runtime.powerState", "config.hardware.memoryMB", "summary.config.memorySizeMB", "config.extraConfig", "runtime.nope"],
    )];
    let result = collector.retrieve_properties_ex(&request(vec![filter(props, vec![ObjectSpec::new(vm)])])).unwrap();
    let content = &result.objects[0];

    assert_eq!(
        content.property("runtime.powerState").map(|p| &p.val),
        Some(&Value::Enum { r#type: "VirtualMachinePowerState".to_owned(), value: "poweredOn".to_owned() })
    );
    assert_eq!(content.property("config.hardware.memoryMB").map(|p| &p.val), Some(&Value::Int(32)));
    assert_eq!(content.property("summary.config.memorySizeMB").map(|p| &p.val), Some(&Value::Int(32)));
    assert_eq!(content.property("config.extraConfig").map(|p| p.val.type_name()).as_deref(), Some("ArrayOfOptionValue"));
    assert_eq!(content.missing_set.len(), 1);
    assert_eq!(content.missing_set[0].path, "runtime.nope");
}

#[test]
fn all_properties_flatten_embedded_bases() {
    let (registry, collector) = inventory();
    let cluster = registry.references(Some("ClusterComputeResource")).remove(0);

    let req = request(vec![filter(vec![PropertySpec::all("ComputeResource")], vec![ObjectSpec::new(cluster)])]);
    let result = collector.retrieve_properties_ex(&req).unwrap();
    let names: Vec<_> = result.objects[0].prop_set.iter().map(|p| p.name.as_str()).collect();

    for expected in ["name", "parent", "overallStatus", "host", "resourcePool", "summary", "configuration"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
    assert!(!names.contains(&"computeResource"), "embedded records are promoted, not nested");
    assert!(!names.contains(&"disabledMethod"), "empty sequences are skipped");
}
