//! Property path resolution over reflected records.
//!
//! A path like `runtime.powerState` is split on `.`; each segment is upper-cased on its first
//! letter and looked up on the current record, first among its declared fields and then among
//! the fields promoted from embedded base records. Intermediate segments must land on a
//! record to descend into.

use crate::error::ResolveError;
use vsim_domain::reflect::{Field, Reflect, lc_first, uc_first};
use vsim_domain::{DataObject, DynamicProperty, ManagedObjectReference, Value};

/// Resolves `path` on `record` to a transport value.
///
/// # Errors
/// [`ResolveError::MissingField`] when a segment names no field (or tries to descend into a
/// non-record), [`ResolveError::EmptyField`] when a field on the way holds its empty value.
pub fn resolve(record: &dyn Reflect, path: &str) -> Result<Value, ResolveError> {
    let missing = || ResolveError::MissingField { path: path.to_owned(), context: None };
    let empty = || ResolveError::EmptyField { path: path.to_owned(), context: None };

    let mut segments = path.split('.').peekable();
    let mut current = record;

    while let Some(segment) = segments.next() {
        let field = lookup(current, &uc_first(segment)).ok_or_else(missing)?;
        if field.is_empty() {
            return Err(empty());
        }
        if segments.peek().is_none() {
            return transport(&field).ok_or_else(empty);
        }
        current = field.as_record().ok_or_else(missing)?;
    }

    Err(missing())
}

/// Finds a field by internal name: declared fields first, then embedded records in
/// declaration order, depth first.
#[must_use]
pub fn lookup<'a>(record: &'a dyn Reflect, name: &str) -> Option<Field<'a>> {
    if let Some(field) = record.field(name) {
        return Some(field);
    }

    record.descriptor().fields.iter().filter(|f| f.is_embedded()).find_map(|base| match record.field(base.name) {
        Some(Field::Embedded(inner)) => lookup(inner, name),
        _ => None,
    })
}

/// Converts a field for transport. Sequences become `ArrayOf*` containers, records become
/// data objects. `None` for absent optionals.
#[must_use]
pub fn transport(field: &Field<'_>) -> Option<Value> {
    let value = match field {
        Field::Bool(v) => Value::Bool(*v),
        Field::Int(v) => Value::Int(*v),
        Field::Long(v) => Value::Long(*v),
        Field::Text(v) => Value::String((*v).to_owned()),
        Field::Enum { type_name, value } => Value::Enum { r#type: (*type_name).to_owned(), value: (*value).to_owned() },
        Field::Reference(r) => Value::ManagedObjectReference((*r).clone()),
        Field::OptionalReference(r) => Value::ManagedObjectReference((*r)?.clone()),
        Field::Strings(v) => Value::ArrayOfString(v.to_vec()),
        Field::Ints(v) => Value::ArrayOfInt(v.to_vec()),
        Field::Longs(v) => Value::ArrayOfLong(v.to_vec()),
        Field::References(v) => Value::ArrayOfManagedObjectReference(v.to_vec()),
        Field::Record(r) | Field::Embedded(r) => Value::DataObject(flatten(*r)),
        Field::OptionalRecord(r) => Value::DataObject(flatten((*r)?)),
        Field::Records { element, items } => Value::ArrayOfDataObject {
            element: (*element).to_owned(),
            items: items.iter().map(|r| flatten(*r)).collect(),
        },
    };
    Some(value)
}

/// Every non-empty property of `record`, embedded base fields promoted in place.
#[must_use]
pub fn collect_all(record: &dyn Reflect) -> Vec<DynamicProperty> {
    let mut props = Vec::new();
    collect_into(record, &mut props);
    props
}

fn collect_into(record: &dyn Reflect, props: &mut Vec<DynamicProperty>) {
    for descriptor in record.descriptor().fields {
        let Some(field) = record.field(descriptor.name) else { continue };
        if field.is_empty() {
            continue;
        }
        if let Field::Embedded(base) = &field {
            collect_into(*base, props);
            continue;
        }
        if let Some(val) = transport(&field) {
            props.push(DynamicProperty { name: lc_first(descriptor.name), val });
        }
    }
}

/// A nested record as transport data object.
#[must_use]
pub fn flatten(record: &dyn Reflect) -> DataObject {
    DataObject { type_name: record.descriptor().name.to_owned(), prop_set: collect_all(record) }
}

/// References carried by a resolved value: one for a single reference, all of an
/// `ArrayOfManagedObjectReference`, none for anything else.
#[must_use]
pub fn references_in(value: &Value) -> Vec<ManagedObjectReference> {
    match value {
        Value::ManagedObjectReference(r) => vec![r.clone()],
        Value::ArrayOfManagedObjectReference(refs) => refs.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsim_derive::Reflect;

    #[derive(Debug, Default, Reflect)]
    struct Entity {
        name: String,
        parent: Option<ManagedObjectReference>,
        tag: Vec<String>,
    }

    #[derive(Debug, Default, Reflect)]
    #[reflect(type_name = "RuntimeInfo")]
    struct Runtime {
        host: Option<ManagedObjectReference>,
        boot_count: i32,
    }

    #[derive(Debug, Default, Reflect)]
    struct Pair {
        key: String,
        value: String,
    }

    #[derive(Debug, Default, Reflect)]
    struct Machine {
        #[reflect(embed)]
        entity: Entity,
        #[reflect(record)]
        runtime: Runtime,
        #[reflect(record)]
        extra: Vec<Pair>,
        datastore: Vec<ManagedObjectReference>,
        uptime: i64,
    }

    fn machine() -> Machine {
        Machine {
            entity: Entity {
                name: "vm0".to_owned(),
                parent: Some(ManagedObjectReference::new("Folder", "group-v3")),
                tag: Vec::new(),
            },
            runtime: Runtime { host: Some(ManagedObjectReference::new("HostSystem", "host-1")), boot_count: 0 },
            extra: vec![Pair { key: "a".to_owned(), value: String::new() }],
            datastore: vec![ManagedObjectReference::new("Datastore", "datastore-1")],
            uptime: 0,
        }
    }

    fn missing(path: &str) -> ResolveError {
        ResolveError::MissingField { path: path.to_owned(), context: None }
    }

    fn empty(path: &str) -> ResolveError {
        ResolveError::EmptyField { path: path.to_owned(), context: None }
    }

    #[test]
    fn test_promoted_fields_resolve_through_embedding() {
        let vm = machine();
        assert_eq!(resolve(&vm, "name"), Ok(Value::String("vm0".to_owned())));
        assert_eq!(
            resolve(&vm, "parent"),
            Ok(Value::ManagedObjectReference(ManagedObjectReference::new("Folder", "group-v3")))
        );
    }

    #[test]
    fn test_nested_path_descends_into_records() {
        let vm = machine();
        let host = resolve(&vm, "runtime.host").unwrap();
        assert_eq!(references_in(&host), vec![ManagedObjectReference::new("HostSystem", "host-1")]);
        assert_eq!(resolve(&vm, "runtime.bootCount"), Ok(Value::Int(0)), "zero numbers are values");
    }

    #[test]
    fn test_sequences_are_wrapped() {
        let vm = machine();
        let value = resolve(&vm, "datastore").unwrap();
        assert_eq!(value.type_name(), "ArrayOfManagedObjectReference");
        assert_eq!(references_in(&value).len(), 1);

        let Value::ArrayOfDataObject { element, items } = resolve(&vm, "extra").unwrap() else {
            panic!("expected record array");
        };
        assert_eq!(element, "Pair");
        assert_eq!(items[0].prop_set.len(), 1, "empty record fields are omitted");
    }

    #[test]
    fn test_missing_and_empty_are_distinct() {
        let vm = machine();
        assert_eq!(resolve(&vm, "bogusField"), Err(missing("bogusField")));
        assert_eq!(resolve(&vm, "tag"), Err(empty("tag")));
        assert_eq!(resolve(&vm, "runtime.nope"), Err(missing("runtime.nope")));
        assert_eq!(resolve(&vm, "name.length"), Err(missing("name.length")), "scalars have no fields");
        assert_eq!(resolve(&vm, ""), Err(missing("")));
    }

    #[test]
    fn test_empty_intermediate_is_empty() {
        let mut vm = machine();
        vm.entity.name.clear();
        assert_eq!(resolve(&vm, "name"), Err(empty("name")));
    }

    #[test]
    fn test_collect_all_promotes_and_skips_empty() {
        let vm = machine();
        let names: Vec<_> = collect_all(&vm).into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["name", "parent", "runtime", "extra", "datastore", "uptime"]);

        let runtime = flatten(&vm.runtime);
        assert_eq!(runtime.type_name, "RuntimeInfo");
        assert!(runtime.get("bootCount").is_some());
    }

    #[test]
    fn test_non_reference_values_carry_no_references() {
        assert!(references_in(&Value::String("x".to_owned())).is_empty());
        assert!(references_in(&Value::ArrayOfString(vec!["a".to_owned()])).is_empty());
    }
}
