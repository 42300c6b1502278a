//! # vsim CLI
//!
//! Builds a simulator from the layered config and runs one command against it. Output goes
//! to the given writer; logs go to stderr.

pub mod args;
mod commands;

use crate::args::{Cli, Command};
use anyhow::{Context, Result};
use std::io::Write;
use vsim::Simulator;
use vsim::domain::config::SimulatorConfig;

/// Runs `cli` against a fresh simulator.
///
/// # Errors
/// Returns an error if the simulator cannot be built, the request cannot be read or parsed,
/// or the output cannot be written. Method faults are part of the printed response, not
/// errors.
pub fn run(cli: &Cli, cfg: SimulatorConfig, out: &mut impl Write) -> Result<()> {
    let sim = Simulator::builder().config(cfg).build().context("Failed to build the simulator")?;

    match &cli.command {
        Command::Inventory { kind } => commands::inventory(&sim, kind.as_deref(), out),
        Command::Schema {} => commands::schema(&sim, out),
        Command::Call { input, pretty } => commands::call(&sim, input, *pretty, out),
    }
}
