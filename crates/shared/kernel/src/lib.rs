//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it owns config loading and the type schema every slice
//! consults, and re-exports the domain crate.
//!
//! ## Config loading
//! ```rust,no_run
//! use vsim_kernel::config::load_config;
//! use vsim_kernel::domain::config::SimulatorConfig;
//!
//! let cfg: SimulatorConfig = load_config(Some("vsim.toml")).unwrap();
//! ```
//!
//! ## Schema
//! ```rust,ignore
//! let schema = Schema::builder().register::<Folder>().register::<VirtualMachine>().build()?;
//! assert!(schema.matches(vm.descriptor(), "ManagedEntity"));
//! ```

pub mod config;
pub mod schema;

pub use schema::{Schema, SchemaBuilder, SchemaError};
pub use vsim_domain as domain;
