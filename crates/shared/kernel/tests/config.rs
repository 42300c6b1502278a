use std::io::Write;
use tempfile::NamedTempFile;
use vsim_kernel::config::{ConfigError, ConfigLoader, load_config};
use vsim_kernel::domain::config::SimulatorConfig;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn file_values_override_defaults() {
    let file = toml_file(
        r#"
        [model]
        machine = 4
        autostart = false

        [logging]
        level = "debug"
        "#,
    );

    let cfg: SimulatorConfig = load_config(Some(file.path())).expect("config loads");
    assert_eq!(cfg.model.machine, 4);
    assert!(!cfg.model.autostart);
    assert_eq!(cfg.model.datacenter, 1);
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.service.root_folder, "group-d1");
}

#[test]
fn environment_overrides_file() {
    let file = toml_file("[model]\nhost = 2\n");

    let mut env = config::Map::new();
    env.insert("VSIM__MODEL__HOST".to_owned(), "5".to_owned());
    env.insert("VSIM__SERVICE__PROPERTY_COLLECTOR".to_owned(), "pc-1".to_owned());

    let cfg: SimulatorConfig = ConfigLoader::new().file(file.path()).env_source(env).load().expect("config loads");
    assert_eq!(cfg.model.host, 5);
    assert_eq!(cfg.service.property_collector, "pc-1");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let result: Result<SimulatorConfig, _> = load_config(Some("/definitely/not/here.toml"));
    assert!(matches!(result, Err(ConfigError::Config { .. })));
}

#[test]
fn empty_sources_yield_defaults() {
    let cfg: SimulatorConfig = ConfigLoader::new().env_source(config::Map::new()).load().expect("defaults");
    assert_eq!(cfg.model.cluster_host, 3);
    assert_eq!(cfg.logging.level, "info");
}
