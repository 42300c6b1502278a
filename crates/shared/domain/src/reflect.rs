//! Static type descriptors and the borrowed field view used by property resolution.
//!
//! Every record or managed-object kind publishes one [`TypeDescriptor`] (usually generated by
//! `#[derive(Reflect)]` / `#[derive(ManagedObject)]` from `vsim-derive`). The descriptor lists
//! the fields in declaration order together with their [`FieldKind`], which is enough to:
//!
//! * enumerate every property of an object ("all" retrieval), promoting the fields of
//!   embedded base records into the outer type;
//! * walk the base-type chain when matching a property spec against a generic type;
//! * resolve a string path segment to a concrete [`Field`] via [`Reflect::field`].
//!
//! Field names are stored in the internal upper-camel form (`PowerState`). The API exposes
//! the lower-camel form (`powerState`), see [`FieldDescriptor::api_name`].

use crate::reference::ManagedObjectReference;
use std::any::Any;
use std::fmt::Debug;

/// What a declared field holds, as far as traversal and enumeration are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Scalar, string, enum or single (optional) reference.
    Value,
    /// Ordered sequence of scalars or references.
    Sequence,
    /// Nested data record, or a sequence of them, named by the record type.
    Record(&'static str),
    /// Embedded base record; its fields are promoted into the outer type.
    Embedded(&'static TypeDescriptor),
}

#[derive(Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Internal upper-camel name.
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        matches!(self.kind, FieldKind::Embedded(_))
    }

    /// Lower-camel name as seen by API clients.
    #[must_use]
    pub fn api_name(&self) -> String {
        lc_first(self.name)
    }
}

/// Schema of one record or managed-object kind.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl TypeDescriptor {
    /// Finds a field declared directly on this type.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        let fields = self.fields;
        fields.iter().find(|f| f.name == name)
    }

    /// Embedded base records in declaration order.
    pub fn embedded(&self) -> impl Iterator<Item = &'static TypeDescriptor> {
        let fields = self.fields;
        fields.iter().filter_map(|f| match f.kind {
            FieldKind::Embedded(base) => Some(base),
            _ => None,
        })
    }

    /// Every base type reachable through embedding, nearest first, without duplicates.
    #[must_use]
    pub fn base_types(&self) -> Vec<&'static str> {
        let mut bases = Vec::new();
        collect_bases(self, &mut bases);
        bases
    }
}

fn collect_bases(descriptor: &TypeDescriptor, out: &mut Vec<&'static str>) {
    for base in descriptor.embedded() {
        if !out.contains(&base.name) {
            out.push(base.name);
        }
        collect_bases(base, out);
    }
}

/// Borrowed view of one field value.
#[derive(Debug, Clone)]
pub enum Field<'a> {
    Bool(bool),
    Int(i32),
    Long(i64),
    Text(&'a str),
    Enum { type_name: &'static str, value: &'static str },
    Reference(&'a ManagedObjectReference),
    OptionalReference(Option<&'a ManagedObjectReference>),
    Strings(&'a [String]),
    Ints(&'a [i32]),
    Longs(&'a [i64]),
    References(&'a [ManagedObjectReference]),
    Record(&'a dyn Reflect),
    OptionalRecord(Option<&'a dyn Reflect>),
    Records { element: &'static str, items: Vec<&'a dyn Reflect> },
    Embedded(&'a dyn Reflect),
}

impl<'a> Field<'a> {
    /// Zero value in the protocol sense: absent optionals, empty strings, empty sequences.
    /// Numbers, booleans, enums and non-optional records are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::OptionalReference(r) => r.is_none(),
            Self::OptionalRecord(r) => r.is_none(),
            Self::Strings(v) => v.is_empty(),
            Self::Ints(v) => v.is_empty(),
            Self::Longs(v) => v.is_empty(),
            Self::References(v) => v.is_empty(),
            Self::Records { items, .. } => items.is_empty(),
            Self::Bool(_)
            | Self::Int(_)
            | Self::Long(_)
            | Self::Enum { .. }
            | Self::Reference(_)
            | Self::Record(_)
            | Self::Embedded(_) => false,
        }
    }

    /// The record a path may descend into, if this field holds one.
    #[must_use]
    pub fn as_record(&self) -> Option<&'a dyn Reflect> {
        match self {
            Self::Record(r) | Self::Embedded(r) | Self::OptionalRecord(Some(r)) => Some(*r),
            _ => None,
        }
    }
}

/// Conversion of a plain Rust field into a [`Field`] view.
///
/// Implemented for the scalar, string, reference and sequence types the derive macros accept
/// without an attribute. Enum kinds implement it by returning [`Field::Enum`].
pub trait AsField {
    fn as_field(&self) -> Field<'_>;
}

impl AsField for bool {
    fn as_field(&self) -> Field<'_> {
        Field::Bool(*self)
    }
}

impl AsField for i32 {
    fn as_field(&self) -> Field<'_> {
        Field::Int(*self)
    }
}

impl AsField for i64 {
    fn as_field(&self) -> Field<'_> {
        Field::Long(*self)
    }
}

impl AsField for String {
    fn as_field(&self) -> Field<'_> {
        Field::Text(self)
    }
}

impl AsField for Option<String> {
    fn as_field(&self) -> Field<'_> {
        Field::Text(self.as_deref().unwrap_or_default())
    }
}

impl AsField for ManagedObjectReference {
    fn as_field(&self) -> Field<'_> {
        Field::Reference(self)
    }
}

impl AsField for Option<ManagedObjectReference> {
    fn as_field(&self) -> Field<'_> {
        Field::OptionalReference(self.as_ref())
    }
}

impl AsField for Vec<String> {
    fn as_field(&self) -> Field<'_> {
        Field::Strings(self)
    }
}

impl AsField for Vec<i32> {
    fn as_field(&self) -> Field<'_> {
        Field::Ints(self)
    }
}

impl AsField for Vec<i64> {
    fn as_field(&self) -> Field<'_> {
        Field::Longs(self)
    }
}

impl AsField for Vec<ManagedObjectReference> {
    fn as_field(&self) -> Field<'_> {
        Field::References(self)
    }
}

/// Compile-time access to a type's descriptor.
pub trait Describe {
    const DESCRIPTOR: &'static TypeDescriptor;
}

/// Object-safe reflection over one record.
pub trait Reflect: Debug + Send + Sync {
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Looks up a field declared directly on this record by its internal upper-camel name.
    ///
    /// Embedded records are returned as [`Field::Embedded`]; their own fields are not
    /// searched here.
    fn field(&self, name: &str) -> Option<Field<'_>>;
}

/// A record that is also a registry entry, identified by its self reference.
pub trait ManagedObject: Reflect + Any {
    fn reference(&self) -> &ManagedObjectReference;

    fn reference_mut(&mut self) -> &mut ManagedObjectReference;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Upper-cases the first character (`powerState` → `PowerState`).
#[must_use]
pub fn uc_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

/// Lower-cases the first character (`PowerState` → `powerState`).
#[must_use]
pub fn lc_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| first.to_lowercase().chain(chars).collect())
}
