//! Request and response shapes of the property collector and service instance methods.
//!
//! Field names follow the lower-camel wire convention; optional protocol flags are kept as
//! `Option<bool>` so an absent flag round-trips as absent.

use crate::fault::{LocalizedMethodFault, MethodFault};
use crate::reference::ManagedObjectReference;
use crate::value::DynamicProperty;
use serde::{Deserialize, Serialize};

/// Selects which properties to read from objects of one type (or of any type built on it).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_set: Vec<String>,
}

impl PropertySpec {
    /// Every property of the type.
    pub fn all(r#type: impl Into<String>) -> Self {
        Self { r#type: r#type.into(), all: Some(true), path_set: Vec::new() }
    }

    /// An explicit list of dotted property paths.
    pub fn paths<I, S>(r#type: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { r#type: r#type.into(), all: None, path_set: paths.into_iter().map(Into::into).collect() }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.all.unwrap_or(false)
    }
}

/// One relationship step. A nested `select_set` (even an empty one) marks `path` as
/// recursive: references found under it on visited objects keep expanding the walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_set: Option<Vec<Self>>,
}

impl TraversalSpec {
    /// A single hop over `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    /// A hop over `path` that keeps expanding on every visited object.
    pub fn recursive(path: impl Into<String>) -> Self {
        Self { path: path.into(), select_set: Some(Vec::new()), ..Self::default() }
    }

    #[must_use]
    pub const fn is_recursive(&self) -> bool {
        self.select_set.is_some()
    }
}

/// A root object plus the traversal steps taken from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSpec {
    pub obj: ManagedObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub select_set: Vec<TraversalSpec>,
}

impl ObjectSpec {
    #[must_use]
    pub fn new(obj: ManagedObjectReference) -> Self {
        Self { obj, ..Self::default() }
    }

    #[must_use]
    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub fn select(mut self, spec: TraversalSpec) -> Self {
        self.select_set.push(spec);
        self
    }
}

/// One filter of a retrieval request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilterSpec {
    #[serde(default)]
    pub prop_set: Vec<PropertySpec>,
    #[serde(default)]
    pub object_set: Vec<ObjectSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_missing_objects_in_results: Option<bool>,
}

impl PropertyFilterSpec {
    #[must_use]
    pub fn reports_missing_objects(&self) -> bool {
        self.report_missing_objects_in_results.unwrap_or(false)
    }
}

/// Paging options. Accepted for compatibility; every result is returned in one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_objects: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievePropertiesEx {
    pub this: ManagedObjectReference,
    pub spec_set: Vec<PropertyFilterSpec>,
    #[serde(default)]
    pub options: RetrieveOptions,
}

/// Deprecated retrieval call; same semantics as [`RetrievePropertiesEx`] without options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveProperties {
    pub this: ManagedObjectReference,
    pub spec_set: Vec<PropertyFilterSpec>,
}

impl From<RetrieveProperties> for RetrievePropertiesEx {
    fn from(legacy: RetrieveProperties) -> Self {
        Self { this: legacy.this, spec_set: legacy.spec_set, options: RetrieveOptions::default() }
    }
}

/// A requested path that does not exist on the object's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingProperty {
    pub path: String,
    pub fault: LocalizedMethodFault,
}

impl MissingProperty {
    pub fn invalid(path: impl Into<String>) -> Self {
        let path = path.into();
        let fault = MethodFault::InvalidProperty { name: path.clone() }.into();
        Self { path, fault }
    }
}

/// Properties read from one visited object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub obj: ManagedObjectReference,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prop_set: Vec<DynamicProperty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_set: Vec<MissingProperty>,
}

impl ObjectContent {
    #[must_use]
    pub const fn new(obj: ManagedObjectReference) -> Self {
        Self { obj, prop_set: Vec::new(), missing_set: Vec::new() }
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&DynamicProperty> {
        self.prop_set.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetrieveResult {
    pub objects: Vec<ObjectContent>,
}

impl RetrieveResult {
    #[must_use]
    pub fn references(&self) -> Vec<&ManagedObjectReference> {
        self.objects.iter().map(|o| &o.obj).collect()
    }
}

/// Entry points of the service instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceContent {
    pub root_folder: ManagedObjectReference,
    pub property_collector: ManagedObjectReference,
}

/// A method invocation addressed to one managed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum MethodCall {
    RetrieveServiceContent { this: ManagedObjectReference },
    RetrieveProperties(RetrieveProperties),
    RetrievePropertiesEx(RetrievePropertiesEx),
}

impl MethodCall {
    #[must_use]
    pub const fn this(&self) -> &ManagedObjectReference {
        match self {
            Self::RetrieveServiceContent { this } => this,
            Self::RetrieveProperties(req) => &req.this,
            Self::RetrievePropertiesEx(req) => &req.this,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RetrieveServiceContent { .. } => "RetrieveServiceContent",
            Self::RetrieveProperties(_) => "RetrieveProperties",
            Self::RetrievePropertiesEx(_) => "RetrievePropertiesEx",
        }
    }
}

/// Successful method result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReturnValue {
    ServiceContent(ServiceContent),
    Result(RetrieveResult),
    Objects(Vec<ObjectContent>),
}

/// Method response body: exactly one of `returnval` or `fault` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returnval: Option<ReturnValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<LocalizedMethodFault>,
}

impl ResponseBody {
    #[must_use]
    pub const fn ok(value: ReturnValue) -> Self {
        Self { returnval: Some(value), fault: None }
    }

    #[must_use]
    pub fn fault(fault: MethodFault) -> Self {
        Self { returnval: None, fault: Some(fault.into()) }
    }
}

impl From<Result<ReturnValue, MethodFault>> for ResponseBody {
    fn from(result: Result<ReturnValue, MethodFault>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(fault) => Self::fault(fault),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_reads_wire_names() {
        let json = serde_json::json!({
            "method": "RetrievePropertiesEx",
            "this": { "type": "PropertyCollector", "value": "propertyCollector" },
            "specSet": [{
                "propSet": [{ "type": "Folder", "pathSet": ["name", "childEntity"] }],
                "objectSet": [{
                    "obj": { "type": "Folder", "value": "group-d1" },
                    "skip": false,
                    "selectSet": [{ "path": "childEntity", "selectSet": [] }]
                }],
                "reportMissingObjectsInResults": true
            }]
        });

        let call: MethodCall = serde_json::from_value(json).unwrap();
        let MethodCall::RetrievePropertiesEx(req) = call else {
            panic!("wrong method");
        };
        let filter = &req.spec_set[0];
        assert!(filter.reports_missing_objects());
        assert_eq!(filter.prop_set[0].path_set, vec!["name", "childEntity"]);
        assert!(filter.object_set[0].select_set[0].is_recursive());
        assert_eq!(req.options.max_objects, None);
    }

    #[test]
    fn test_traversal_without_select_set_is_single_hop() {
        let spec: TraversalSpec = serde_json::from_str(r#"{ "path": "vmFolder" }"#).unwrap();
        assert!(!spec.is_recursive());
        assert!(TraversalSpec::recursive("childEntity").is_recursive());
    }

    #[test]
    fn test_legacy_request_converts_without_losing_flags() {
        let filter = PropertyFilterSpec { report_missing_objects_in_results: Some(true), ..PropertyFilterSpec::default() };
        let legacy = RetrieveProperties { this: ManagedObjectReference::default(), spec_set: vec![filter.clone()] };
        let ex = RetrievePropertiesEx::from(legacy);
        assert_eq!(ex.spec_set, vec![filter]);
    }

    #[test]
    fn test_response_body_from_fault() {
        let body = ResponseBody::from(Err::<ReturnValue, _>(MethodFault::InvalidProperty { name: "x".to_owned() }));
        assert!(body.returnval.is_none());
        assert_eq!(body.fault.map(|f| f.fault.kind()), Some("InvalidProperty"));
    }

    #[test]
    fn test_return_values_keep_their_shape_when_empty() {
        let empty = serde_json::to_value(ResponseBody::ok(ReturnValue::Result(RetrieveResult::default()))).unwrap();
        assert_eq!(empty, serde_json::json!({ "returnval": { "objects": [] } }));

        let legacy = serde_json::to_value(ResponseBody::ok(ReturnValue::Objects(vec![]))).unwrap();
        assert_eq!(legacy, serde_json::json!({ "returnval": [] }));
    }
}
