use anyhow::Context;
use clap::Parser;
use vsim::domain::config::SimulatorConfig;
use vsim::kernel::config::load_config;
use vsim_cli::args::Cli;
use vsim_logger::Logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: SimulatorConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)?;

    let stdout = std::io::stdout();
    vsim_cli::run(&cli, cfg, &mut stdout.lock())
}
