use crate::error::CollectorError;
use crate::traversal::Traversal;
use tracing::{debug, instrument};
use vsim_domain::methods::{ObjectContent, RetrieveProperties, RetrievePropertiesEx, RetrieveResult};
use vsim_domain::{ManagedObjectReference, MethodFault};
use vsim_kernel::Schema;
use vsim_registry::Registry;

/// The API-facing retrieval service bound to one collector reference.
///
/// Holds shared handles only; every call builds its own [`Traversal`], so concurrent calls
/// share nothing but the registry.
#[derive(Debug, Clone)]
pub struct PropertyCollector {
    reference: ManagedObjectReference,
    registry: Registry,
    schema: Schema,
}

impl PropertyCollector {
    #[must_use]
    pub const fn new(reference: ManagedObjectReference, registry: Registry, schema: Schema) -> Self {
        Self { reference, registry, schema }
    }

    #[must_use]
    pub const fn reference(&self) -> &ManagedObjectReference {
        &self.reference
    }

    /// Retrieves the properties selected by `request.spec_set`.
    ///
    /// # Errors
    /// [`MethodFault::ManagedObjectNotFound`] when an object is absent and its filter does
    /// not report missing objects. Property-level problems never fail the call.
    #[instrument(skip_all, fields(collector = %self.reference, filters = request.spec_set.len()))]
    pub fn retrieve_properties_ex(&self, request: &RetrievePropertiesEx) -> Result<RetrieveResult, MethodFault> {
        if let Some(max) = request.options.max_objects {
            debug!(max, "max_objects ignored; returning a single page");
        }

        let objects = Traversal::new(&self.registry, &self.schema, &request.spec_set).run().map_err(to_fault)?;
        debug!(objects = objects.len(), "retrieved");
        Ok(RetrieveResult { objects })
    }

    /// Deprecated variant: same selection, object contents only.
    ///
    /// # Errors
    /// See [`PropertyCollector::retrieve_properties_ex`].
    pub fn retrieve_properties(&self, request: &RetrieveProperties) -> Result<Vec<ObjectContent>, MethodFault> {
        let request = RetrievePropertiesEx::from(request.clone());
        self.retrieve_properties_ex(&request).map(|result| result.objects)
    }
}

fn to_fault(err: CollectorError) -> MethodFault {
    match err {
        CollectorError::ObjectNotFound { obj, .. } => MethodFault::ManagedObjectNotFound { obj },
    }
}
