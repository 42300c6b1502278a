use crate::reference::ManagedObjectReference;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Owned, transport-ready property value.
///
/// Sequences are always wrapped into their typed `ArrayOf*` container; scalars and single
/// references pass through as-is. Nested records are carried as [`DataObject`]s.
///
/// Serialized as `{"_typeName": .., "_value": ..}` where the tag is [`Value::type_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Long(i64),
    String(String),
    Enum {
        r#type: String,
        value: String,
    },
    ManagedObjectReference(ManagedObjectReference),
    DataObject(DataObject),
    ArrayOfString(Vec<String>),
    ArrayOfInt(Vec<i32>),
    ArrayOfLong(Vec<i64>),
    ArrayOfManagedObjectReference(Vec<ManagedObjectReference>),
    ArrayOfDataObject {
        element: String,
        items: Vec<DataObject>,
    },
}

impl Value {
    /// Protocol type name of the value (`string`, `ArrayOfManagedObjectReference`, …).
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Bool(_) => "boolean".to_owned(),
            Self::Int(_) => "int".to_owned(),
            Self::Long(_) => "long".to_owned(),
            Self::String(_) => "string".to_owned(),
            Self::Enum { r#type, .. } => r#type.clone(),
            Self::ManagedObjectReference(_) => "ManagedObjectReference".to_owned(),
            Self::DataObject(object) => object.type_name.clone(),
            Self::ArrayOfString(_) => "ArrayOfString".to_owned(),
            Self::ArrayOfInt(_) => "ArrayOfInt".to_owned(),
            Self::ArrayOfLong(_) => "ArrayOfLong".to_owned(),
            Self::ArrayOfManagedObjectReference(_) => "ArrayOfManagedObjectReference".to_owned(),
            Self::ArrayOfDataObject { element, .. } => format!("ArrayOf{element}"),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Enum { value, .. } => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_reference(&self) -> Option<&ManagedObjectReference> {
        match self {
            Self::ManagedObjectReference(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_references(&self) -> Option<&[ManagedObjectReference]> {
        match self {
            Self::ArrayOfManagedObjectReference(refs) => Some(refs),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Value", 2)?;
        out.serialize_field("_typeName", &self.type_name())?;
        match self {
            Self::Bool(v) => out.serialize_field("_value", v)?,
            Self::Int(v) => out.serialize_field("_value", v)?,
            Self::Long(v) => out.serialize_field("_value", v)?,
            Self::String(v) | Self::Enum { value: v, .. } => out.serialize_field("_value", v)?,
            Self::ManagedObjectReference(v) => out.serialize_field("_value", v)?,
            Self::DataObject(v) => out.serialize_field("_value", v)?,
            Self::ArrayOfString(v) => out.serialize_field("_value", v)?,
            Self::ArrayOfInt(v) => out.serialize_field("_value", v)?,
            Self::ArrayOfLong(v) => out.serialize_field("_value", v)?,
            Self::ArrayOfManagedObjectReference(v) => out.serialize_field("_value", v)?,
            Self::ArrayOfDataObject { items, .. } => out.serialize_field("_value", items)?,
        }
        out.end()
    }
}

impl From<ManagedObjectReference> for Value {
    fn from(value: ManagedObjectReference) -> Self {
        Self::ManagedObjectReference(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

/// A nested record converted for transport: its type name and its non-empty properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataObject {
    pub type_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prop_set: Vec<DynamicProperty>,
}

impl DataObject {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.prop_set.iter().find(|p| p.name == name).map(|p| &p.val)
    }
}

/// One `(name, value)` pair of an object content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicProperty {
    pub name: String,
    pub val: Value,
}

impl DynamicProperty {
    pub fn new(name: impl Into<String>, val: impl Into<Value>) -> Self {
        Self { name: name.into(), val: val.into() }
    }
}
