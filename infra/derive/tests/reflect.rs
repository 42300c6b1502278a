use vsim_derive::{ManagedObject, Reflect};
use vsim_domain::ManagedObjectReference;
use vsim_domain::reflect::{Describe, Field, FieldKind, ManagedObject as _, Reflect as _};

#[derive(Debug, Default, Reflect, ManagedObject)]
struct Entity {
    #[reflect(reference)]
    self_ref: ManagedObjectReference,
    name: String,
    parent: Option<ManagedObjectReference>,
}

#[derive(Debug, Default, Reflect)]
#[reflect(type_name = "SampleInfo")]
struct Info {
    #[reflect(rename = "memoryMB")]
    memory_mb: i32,
}

#[derive(Debug, Default, Reflect, ManagedObject)]
struct Machine {
    #[reflect(embed)]
    entity: Entity,
    #[reflect(record)]
    config: Option<Info>,
    #[reflect(record)]
    snapshots: Vec<Info>,
    datastore: Vec<ManagedObjectReference>,
    #[reflect(skip)]
    scratch: u8,
}

fn machine() -> Machine {
    Machine {
        entity: Entity {
            self_ref: ManagedObjectReference::new("Machine", "vm-1"),
            name: "vm".to_owned(),
            parent: None,
        },
        config: Some(Info { memory_mb: 32 }),
        snapshots: vec![Info::default(), Info::default()],
        datastore: vec![ManagedObjectReference::new("Datastore", "datastore-1")],
        scratch: 0,
    }
}

#[test]
fn descriptor_lists_fields_in_declaration_order() {
    let descriptor = <Machine as Describe>::DESCRIPTOR;
    let names: Vec<_> = descriptor.fields.iter().map(|f| f.name).collect();

    assert_eq!(descriptor.name, "Machine");
    assert_eq!(names, ["Entity", "Config", "Snapshots", "Datastore"]);
    assert_eq!(descriptor.fields[1].kind, FieldKind::Record("SampleInfo"));
    assert_eq!(descriptor.fields[3].kind, FieldKind::Sequence);
    assert_eq!(descriptor.base_types(), vec!["Entity"]);
}

#[test]
fn self_reference_is_not_a_field() {
    let descriptor = <Entity as Describe>::DESCRIPTOR;
    assert!(descriptor.field("SelfRef").is_none());
    assert_eq!(descriptor.fields.len(), 2);
}

#[test]
fn reference_is_delegated_to_the_embedded_base() {
    let mut vm = machine();
    assert_eq!(vm.reference().value, "vm-1");

    vm.reference_mut().value = "vm-2".to_owned();
    assert_eq!(vm.entity.self_ref.value, "vm-2");
    assert!(vm.as_any().downcast_ref::<Machine>().is_some());
}

#[test]
fn field_lookup_returns_typed_views() {
    let vm = machine();

    assert!(matches!(vm.field("Datastore"), Some(Field::References(refs)) if refs.len() == 1));
    assert!(matches!(vm.field("Snapshots"), Some(Field::Records { element: "SampleInfo", items }) if items.len() == 2));
    assert!(matches!(vm.field("Entity"), Some(Field::Embedded(_))));
    assert!(vm.field("Name").is_none(), "promoted fields resolve through the embedded record");
    assert!(vm.field("Scratch").is_none());

    let config = vm.field("Config").and_then(|f| f.as_record()).expect("config record");
    assert!(matches!(config.field("MemoryMB"), Some(Field::Int(32))));
}

#[test]
fn absent_optionals_are_empty() {
    let vm = machine();
    let entity = vm.field("Entity").and_then(|f| f.as_record()).expect("entity");
    assert!(entity.field("Parent").is_some_and(|f| f.is_empty()));
    assert!(entity.field("Name").is_some_and(|f| !f.is_empty()));
}

#[derive(Debug, Default, Reflect, ManagedObject)]
#[reflect(type_name = "ManagedEntity")]
struct EntityBase {
    #[reflect(reference)]
    self_ref: ManagedObjectReference,
    name: String,
}

#[derive(Debug, Default, Reflect, ManagedObject)]
#[reflect(type_name = "Folder")]
struct Group {
    #[reflect(embed)]
    base: EntityBase,
    #[reflect(embed, rename = "core")]
    renamed: Entity,
}

#[test]
fn embedded_field_is_named_after_the_described_base_type() {
    let group = Group { base: EntityBase { name: "g".to_owned(), ..EntityBase::default() }, ..Group::default() };
    let names: Vec<_> = <Group as Describe>::DESCRIPTOR.fields.iter().map(|f| f.name).collect();

    assert_eq!(names, ["ManagedEntity", "Core"]);
    assert_eq!(<Group as Describe>::DESCRIPTOR.base_types(), vec!["ManagedEntity", "Entity"]);
    assert!(group.field("EntityBase").is_none());
    assert!(matches!(group.field("Core"), Some(Field::Embedded(_))));

    let base = group.field("ManagedEntity").and_then(|f| f.as_record()).expect("embedded base");
    assert!(matches!(base.field("Name"), Some(Field::Text("g"))));
}
