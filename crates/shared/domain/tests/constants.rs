use vsim_domain::constants::{PROPERTY_COLLECTOR, PROPERTY_COLLECTOR_TYPE, ROOT_FOLDER, SERVICE_INSTANCE};

#[test]
fn constants_match_protocol_strings() {
    assert_eq!(ROOT_FOLDER, "group-d1");
    assert_eq!(PROPERTY_COLLECTOR, "propertyCollector");
    assert_eq!(PROPERTY_COLLECTOR_TYPE, "PropertyCollector");
    assert_eq!(SERVICE_INSTANCE, "ServiceInstance");
}
