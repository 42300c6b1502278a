//! # Registry
//!
//! The simulator's object store: a concurrent map from [`ManagedObjectReference`] to a
//! lockable managed object.
//!
//! ## Example
//!
//! ```rust,ignore
//! use vsim_registry::Registry;
//!
//! let registry = Registry::new();
//! let reference = registry.put(folder);
//! registry.update::<Folder, _>(&reference, |f| f.child_entity.clear())?;
//! assert!(registry.remove(&reference).is_some());
//! assert!(registry.get(&reference).is_none());
//! ```
//!
//! [`ManagedObjectReference`]: vsim_domain::ManagedObjectReference

mod error;
mod store;

pub use error::{RegistryError, RegistryErrorExt};
pub use store::{Registry, SharedObject};
