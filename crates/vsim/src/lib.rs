//! Facade crate for the simulator.
//! Re-exports the domain, kernel and feature slices, and composes them into a [`Simulator`].
//! Keep this crate thin: it wires other crates together, retrieval and inventory logic live
//! in their slices.
//!
//! ## Usage
//! ```rust,no_run
//! use vsim::Simulator;
//! use vsim::domain::methods::MethodCall;
//! use vsim::domain::ManagedObjectReference;
//!
//! let sim = Simulator::builder().build()?;
//! let body = sim.dispatch(&MethodCall::RetrieveServiceContent {
//!     this: ManagedObjectReference::new("ServiceInstance", "ServiceInstance"),
//! });
//! assert!(body.fault.is_none());
//! # Ok::<(), vsim::SimulatorError>(())
//! ```

mod error;
mod simulator;

pub use crate::error::{SimulatorError, SimulatorErrorExt};
pub use crate::simulator::{Simulator, SimulatorBuilder};
pub use vsim_domain as domain;
pub use vsim_kernel as kernel;
pub use vsim_registry::Registry;

/// Feature slices, for callers that need more than method dispatch.
pub mod features {
    pub use vsim_collector as collector;
    pub use vsim_inventory as inventory;
}
