/// Fixed id of the inventory root folder.
pub const ROOT_FOLDER: &str = "group-d1";

/// Fixed id of the default property collector.
pub const PROPERTY_COLLECTOR: &str = "propertyCollector";

/// Type name used for property collector references.
pub const PROPERTY_COLLECTOR_TYPE: &str = "PropertyCollector";

/// Fixed id and type of the service instance.
pub const SERVICE_INSTANCE: &str = "ServiceInstance";
