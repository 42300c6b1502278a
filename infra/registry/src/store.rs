use crate::error::RegistryError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;
use vsim_domain::ManagedObjectReference;
use vsim_domain::reflect::ManagedObject;

/// A registered object. Lock it for the duration of one read or one mutation only.
pub type SharedObject = Arc<RwLock<dyn ManagedObject>>;

#[derive(Debug, Default)]
struct Inner {
    objects: RwLock<FxHashMap<ManagedObjectReference, SharedObject>>,
    next_id: AtomicU64,
}

/// Concurrent map from reference to managed object.
///
/// Cloning is cheap and every clone sees the same objects. The map lock is held only while
/// one entry is inserted, removed or cloned out; object state is guarded by a per-object
/// lock, so retrievals and state changes never hold a lock across more than one access.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<Inner>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh reference for `type_name` (`vm-7`, `host-3`, …).
    ///
    /// One counter is shared across all types, so ids never repeat within a registry.
    #[must_use]
    pub fn new_reference(&self, type_name: &str) -> ManagedObjectReference {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        ManagedObjectReference::new(type_name, format!("{}-{id}", id_prefix(type_name)))
    }

    /// Inserts or replaces `object` under its own reference.
    ///
    /// Objects without a reference get one from [`Registry::new_reference`].
    pub fn put<T: ManagedObject>(&self, mut object: T) -> ManagedObjectReference {
        if object.reference().is_unset() {
            let reference = self.new_reference(object.descriptor().name);
            *object.reference_mut() = reference;
        }
        let reference = object.reference().clone();
        self.insert(reference.clone(), Arc::new(RwLock::new(object)));
        reference
    }

    /// Inserts or replaces `object` under `reference`, which also becomes its own reference.
    pub fn put_as<T: ManagedObject>(&self, reference: ManagedObjectReference, mut object: T) -> ManagedObjectReference {
        object.reference_mut().clone_from(&reference);
        self.insert(reference.clone(), Arc::new(RwLock::new(object)));
        reference
    }

    fn insert(&self, reference: ManagedObjectReference, object: SharedObject) {
        trace!(%reference, "registry put");
        self.inner.objects.write().insert(reference, object);
    }

    /// Looks up an object. Absence is a normal outcome.
    #[must_use]
    pub fn get(&self, reference: &ManagedObjectReference) -> Option<SharedObject> {
        self.inner.objects.read().get(reference).cloned()
    }

    /// Deletes the entry. Holders of a previously returned [`SharedObject`] keep their copy.
    pub fn remove(&self, reference: &ManagedObjectReference) -> Option<SharedObject> {
        let removed = self.inner.objects.write().remove(reference);
        if removed.is_some() {
            trace!(%reference, "registry remove");
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, reference: &ManagedObjectReference) -> bool {
        self.inner.objects.read().contains_key(reference)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.objects.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.objects.read().is_empty()
    }

    /// Registered references in sorted order, optionally only those of one type.
    #[must_use]
    pub fn references(&self, type_name: Option<&str>) -> Vec<ManagedObjectReference> {
        let mut refs: Vec<_> = self
            .inner
            .objects
            .read()
            .keys()
            .filter(|r| type_name.is_none_or(|t| r.r#type == t))
            .cloned()
            .collect();
        refs.sort_unstable();
        refs
    }

    /// Reads a typed view of one object under its shared lock.
    ///
    /// # Errors
    /// [`RegistryError::NotFound`] for an unknown reference, [`RegistryError::TypeMismatch`]
    /// when the object is not a `T`.
    pub fn read<T, R>(&self, reference: &ManagedObjectReference, f: impl FnOnce(&T) -> R) -> Result<R, RegistryError>
    where
        T: ManagedObject,
    {
        let object = self.get(reference).ok_or_else(|| not_found(reference))?;
        let guard = object.read();
        let typed = guard.as_any().downcast_ref::<T>().ok_or_else(|| mismatch::<T>(reference))?;
        Ok(f(typed))
    }

    /// Mutates one object in place under its exclusive lock.
    ///
    /// An object removed while the caller waited for its lock counts as absent, so a callback
    /// that removes its own object wins over every update queued behind it.
    ///
    /// # Errors
    /// Same as [`Registry::read`].
    pub fn update<T, R>(&self, reference: &ManagedObjectReference, f: impl FnOnce(&mut T) -> R) -> Result<R, RegistryError>
    where
        T: ManagedObject,
    {
        let object = self.get(reference).ok_or_else(|| not_found(reference))?;
        let mut guard = object.write();
        if !self.is_registered(reference, &object) {
            return Err(not_found(reference));
        }
        let typed = guard.as_any_mut().downcast_mut::<T>().ok_or_else(|| mismatch::<T>(reference))?;
        trace!(%reference, "registry update");
        Ok(f(typed))
    }

    fn is_registered(&self, reference: &ManagedObjectReference, object: &SharedObject) -> bool {
        self.inner.objects.read().get(reference).is_some_and(|current| Arc::ptr_eq(current, object))
    }
}

fn not_found(reference: &ManagedObjectReference) -> RegistryError {
    RegistryError::NotFound { message: reference.to_string().into(), context: None }
}

fn mismatch<T>(reference: &ManagedObjectReference) -> RegistryError {
    RegistryError::TypeMismatch {
        message: format!("{reference} is not a {}", std::any::type_name::<T>()).into(),
        context: None,
    }
}

/// Id prefix per type, following the naming real inventories use.
fn id_prefix(type_name: &str) -> String {
    match type_name {
        "Folder" => "group".to_owned(),
        "Datacenter" => "datacenter".to_owned(),
        "HostSystem" => "host".to_owned(),
        "VirtualMachine" => "vm".to_owned(),
        "ComputeResource" | "ClusterComputeResource" => "domain".to_owned(),
        "ResourcePool" => "resgroup".to_owned(),
        "Datastore" => "datastore".to_owned(),
        "Network" => "network".to_owned(),
        other => other.to_lowercase(),
    }
}
