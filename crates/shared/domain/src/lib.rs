//! # Domain Models
//!
//! Pure simulator types with a single dependency (`serde`).
//! Keep it lean: no I/O or locking here, only data, descriptors and small helpers.
//!
//! * [`reference`]: the `(type, value)` key every managed object carries.
//! * [`reflect`]: static type descriptors and the borrowed field view resolution works on.
//! * [`value`]: owned, transport-ready property values.
//! * [`methods`]: request and response shapes of the property collector API.
//! * [`fault`]: structured protocol faults.

pub mod config;
pub mod constants;
pub mod fault;
pub mod methods;
pub mod reference;
pub mod reflect;
pub mod value;

pub use fault::{LocalizedMethodFault, MethodFault};
pub use reference::ManagedObjectReference;
pub use value::{DataObject, DynamicProperty, Value};
