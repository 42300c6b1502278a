//! Type schema: the table of every registered object and record kind.
//!
//! Built once at startup from the static descriptors the derive macros generate. Each entry
//! keeps the descriptor and its full base-type chain, so matching a property spec against a
//! generic base type is a lookup instead of a walk.

use fxhash::FxHashMap;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;
use vsim_domain::reflect::{Describe, TypeDescriptor};

#[vsim_derive::vsim_error]
pub enum SchemaError {
    /// Two different descriptors were registered under one type name.
    #[error("Conflicting descriptors for type '{name}'{}", format_context(.context))]
    Conflict { name: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
struct Entry {
    descriptor: &'static TypeDescriptor,
    bases: Vec<&'static str>,
}

/// Cheaply clonable, immutable type table.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: Arc<FxHashMap<&'static str, Entry>>,
}

impl Schema {
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&'static TypeDescriptor> {
        self.types.get(name).map(|e| e.descriptor)
    }

    /// Base types of `name`, nearest first. Empty for unknown or base-less types.
    #[must_use]
    pub fn bases(&self, name: &str) -> &[&'static str] {
        self.types.get(name).map_or(&[], |e| e.bases.as_slice())
    }

    /// Whether a property spec targeting `wanted` applies to an object described by
    /// `descriptor`: the declared name or any embedded base matches.
    ///
    /// Descriptors missing from the table are walked directly.
    #[must_use]
    pub fn matches(&self, descriptor: &TypeDescriptor, wanted: &str) -> bool {
        if descriptor.name == wanted {
            return true;
        }
        match self.types.get(descriptor.name) {
            Some(entry) => entry.bases.contains(&wanted),
            None => descriptor.base_types().contains(&wanted),
        }
    }

    /// Registered type names in lexical order.
    #[must_use]
    pub fn types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    pending: Vec<&'static TypeDescriptor>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn register<T: Describe>(self) -> Self {
        self.descriptor(T::DESCRIPTOR)
    }

    /// Adds a descriptor; its embedded bases are registered with it.
    #[must_use]
    pub fn descriptor(mut self, descriptor: &'static TypeDescriptor) -> Self {
        self.pending.push(descriptor);
        self
    }

    /// # Errors
    /// [`SchemaError::Conflict`] when one name maps to two different descriptors.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut types = FxHashMap::default();
        let mut stack = self.pending;
        stack.reverse();

        while let Some(descriptor) = stack.pop() {
            if let Some(existing) = types.get(descriptor.name).map(|e: &Entry| e.descriptor) {
                if existing != descriptor {
                    return Err(SchemaError::Conflict { name: descriptor.name.into(), context: None });
                }
                continue;
            }

            stack.extend(descriptor.embedded());
            types.insert(descriptor.name, Entry { descriptor, bases: descriptor.base_types() });
        }

        debug!(types = types.len(), "schema built");
        Ok(Schema { types: Arc::new(types) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsim_domain::reflect::{FieldDescriptor, FieldKind};

    static ENTITY: TypeDescriptor = TypeDescriptor {
        name: "ManagedEntity",
        fields: &[FieldDescriptor { name: "Name", kind: FieldKind::Value }],
    };

    static COMPUTE: TypeDescriptor = TypeDescriptor {
        name: "ComputeResource",
        fields: &[
            FieldDescriptor { name: "ManagedEntity", kind: FieldKind::Embedded(&ENTITY) },
            FieldDescriptor { name: "Host", kind: FieldKind::Sequence },
        ],
    };

    static CLUSTER: TypeDescriptor = TypeDescriptor {
        name: "ClusterComputeResource",
        fields: &[FieldDescriptor { name: "ComputeResource", kind: FieldKind::Embedded(&COMPUTE) }],
    };

    static DATASTORE: TypeDescriptor = TypeDescriptor {
        name: "Datastore",
        fields: &[FieldDescriptor { name: "ManagedEntity", kind: FieldKind::Embedded(&ENTITY) }],
    };

    static OTHER_ENTITY: TypeDescriptor = TypeDescriptor { name: "ManagedEntity", fields: &[] };

    #[test]
    fn test_bases_are_registered_with_their_subtypes() {
        let schema = Schema::builder().descriptor(&CLUSTER).build().unwrap();

        assert_eq!(schema.types(), vec!["ClusterComputeResource", "ComputeResource", "ManagedEntity"]);
        assert_eq!(schema.bases("ClusterComputeResource"), ["ComputeResource", "ManagedEntity"]);
        assert!(schema.bases("ManagedEntity").is_empty());
    }

    #[test]
    fn test_matches_own_name_and_every_base() {
        let schema = Schema::builder().descriptor(&CLUSTER).descriptor(&DATASTORE).build().unwrap();

        assert!(schema.matches(&CLUSTER, "ClusterComputeResource"));
        assert!(schema.matches(&CLUSTER, "ComputeResource"));
        assert!(schema.matches(&CLUSTER, "ManagedEntity"));
        assert!(schema.matches(&DATASTORE, "ManagedEntity"));
        assert!(!schema.matches(&DATASTORE, "ComputeResource"));
        assert!(!schema.matches(&COMPUTE, "ClusterComputeResource"), "bases never match subtypes");
    }

    #[test]
    fn test_unregistered_descriptor_is_walked() {
        let schema = Schema::default();
        assert!(schema.matches(&CLUSTER, "ManagedEntity"));
        assert!(!schema.matches(&CLUSTER, "Datastore"));
    }

    #[test]
    fn test_duplicate_registration_is_idempotent() {
        let schema = Schema::builder().descriptor(&COMPUTE).descriptor(&CLUSTER).descriptor(&COMPUTE).build().unwrap();
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn test_conflicting_descriptor_is_rejected() {
        let err = Schema::builder().descriptor(&COMPUTE).descriptor(&OTHER_ENTITY).build().unwrap_err();
        assert!(matches!(err, SchemaError::Conflict { ref name, .. } if name == "ManagedEntity"));
    }
}
