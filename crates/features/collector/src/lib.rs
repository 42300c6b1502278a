//! Property collector slice.
//!
//! * [`resolver`]: dotted path resolution, "all properties" enumeration and transport
//!   conversion over reflected records.
//! * [`traversal`]: the cycle-safe graph walk of one retrieval call.
//! * [`PropertyCollector`]: the `RetrievePropertiesEx` / `RetrieveProperties` methods.

mod error;
pub mod resolver;
mod service;
pub mod traversal;

pub use crate::error::{CollectorError, CollectorErrorExt, ResolveError, ResolveErrorExt};
pub use crate::service::PropertyCollector;
pub use crate::traversal::Traversal;
