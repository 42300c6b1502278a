use crate::error::{SimulatorError, SimulatorErrorExt};
use tracing::{debug, info, instrument};
use vsim_collector::PropertyCollector;
use vsim_domain::config::SimulatorConfig;
use vsim_domain::constants::{PROPERTY_COLLECTOR_TYPE, SERVICE_INSTANCE};
use vsim_domain::methods::{MethodCall, ResponseBody, ReturnValue, ServiceContent};
use vsim_domain::{ManagedObjectReference, MethodFault};
use vsim_inventory::Model;
use vsim_kernel::Schema;
use vsim_registry::Registry;

/// A fluent builder for configuring and initializing the [`Simulator`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug)]
pub struct SimulatorBuilder {
    cfg: SimulatorConfig,
    registry: Option<Registry>,
    populate: bool,
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self { cfg: SimulatorConfig::default(), registry: None, populate: true }
    }
}

impl SimulatorBuilder {
    pub fn config(mut self, cfg: SimulatorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Serves an existing registry instead of a fresh one.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Leaves the registry as given instead of generating the default inventory.
    pub const fn empty(mut self) -> Self {
        self.populate = false;
        self
    }

    /// Consumes the builder: builds the schema, populates the registry and binds the
    /// property collector.
    ///
    /// # Errors
    /// [`SimulatorError::Schema`] on conflicting descriptors, [`SimulatorError::Inventory`]
    /// when the inventory model cannot be linked.
    pub fn build(self) -> Result<Simulator, SimulatorError> {
        let schema = vsim_inventory::schema().context("inventory schema")?;
        let registry = self.registry.unwrap_or_default();
        let service = &self.cfg.service;

        let root_folder = ManagedObjectReference::new("Folder", service.root_folder.as_str());
        if self.populate {
            Model::build(&registry, &service.root_folder, &self.cfg.model).context("default inventory")?;
        }

        let collector_ref = ManagedObjectReference::new(PROPERTY_COLLECTOR_TYPE, service.property_collector.as_str());
        let property_collector = PropertyCollector::new(collector_ref, registry.clone(), schema.clone());

        info!(objects = registry.len(), types = schema.len(), "simulator ready");
        Ok(Simulator { cfg: self.cfg, registry, schema, root_folder, property_collector })
    }
}

/// A composed simulator: one registry, its schema and the property collector serving it.
#[derive(Debug, Clone)]
pub struct Simulator {
    cfg: SimulatorConfig,
    registry: Registry,
    schema: Schema,
    root_folder: ManagedObjectReference,
    property_collector: PropertyCollector,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::default()
    }

    #[must_use]
    pub const fn config(&self) -> &SimulatorConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub const fn property_collector(&self) -> &PropertyCollector {
        &self.property_collector
    }

    #[must_use]
    pub fn service_instance() -> ManagedObjectReference {
        ManagedObjectReference::new(SERVICE_INSTANCE, SERVICE_INSTANCE)
    }

    #[must_use]
    pub fn service_content(&self) -> ServiceContent {
        ServiceContent {
            root_folder: self.root_folder.clone(),
            property_collector: self.property_collector.reference().clone(),
        }
    }

    /// Executes one method call. Failures are returned as a fault body, never as an error.
    #[instrument(skip_all, fields(method = call.name(), this = %call.this()))]
    pub fn dispatch(&self, call: &MethodCall) -> ResponseBody {
        let body = ResponseBody::from(self.invoke(call));
        if let Some(fault) = &body.fault {
            debug!(fault = fault.fault.kind(), "method faulted");
        }
        body
    }

    fn invoke(&self, call: &MethodCall) -> Result<ReturnValue, MethodFault> {
        match call {
            MethodCall::RetrieveServiceContent { this } => {
                expect_target(this, &Self::service_instance())?;
                Ok(ReturnValue::ServiceContent(self.service_content()))
            },
            MethodCall::RetrieveProperties(req) => {
                expect_target(&req.this, self.property_collector.reference())?;
                self.property_collector.retrieve_properties(req).map(ReturnValue::Objects)
            },
            MethodCall::RetrievePropertiesEx(req) => {
                expect_target(&req.this, self.property_collector.reference())?;
                self.property_collector.retrieve_properties_ex(req).map(ReturnValue::Result)
            },
        }
    }
}

/// Calls addressed to an object this simulator does not serve fault like a deleted object.
fn expect_target(this: &ManagedObjectReference, served: &ManagedObjectReference) -> Result<(), MethodFault> {
    if this == served {
        Ok(())
    } else {
        Err(MethodFault::ManagedObjectNotFound { obj: this.clone() })
    }
}
