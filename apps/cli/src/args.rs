//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "vsim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "In-memory hypervisor manager simulator")]
pub struct Cli {
    /// Config file (TOML). Defaults to `vsim.toml` in the working directory when present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the references of the generated inventory
    Inventory {
        /// Only list objects of this type (e.g. `VirtualMachine`)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },
    /// List registered object kinds with their base types and fields
    Schema {},
    /// Execute a JSON method call read from a file (`-` for stdin) and print the response body
    Call {
        /// Path of the request file
        input: PathBuf,
        /// Pretty-print the response
        #[arg(short, long)]
        pretty: bool,
    },
}
