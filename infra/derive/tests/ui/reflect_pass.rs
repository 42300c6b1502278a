use vsim_derive::{ManagedObject, Reflect};
use vsim_domain::ManagedObjectReference;

#[derive(Debug, Default, Reflect, ManagedObject)]
pub struct Base {
    #[reflect(reference)]
    self_ref: ManagedObjectReference,
    name: String,
}

#[derive(Debug, Default, Reflect)]
#[reflect(type_name = "DemoInfo")]
pub struct Info {
    count: i32,
}

#[derive(Debug, Default, Reflect, ManagedObject)]
pub struct Outer {
    #[reflect(embed)]
    base: Base,
    #[reflect(record)]
    info: Option<Info>,
    #[reflect(record)]
    history: Vec<Info>,
    children: Vec<ManagedObjectReference>,
}

fn main() {}
