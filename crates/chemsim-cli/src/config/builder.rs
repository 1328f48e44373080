use super::AppConfig;
use super::defaults::DefaultsConfig;
use super::file::{FileConfig, read_table};
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use chemsim::core::forcefield::params::PhysicsParams;
use chemsim::engine::config::SimulationConfigBuilder;
use nalgebra::Vector3;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let mut table = match &args.config {
        Some(path) => read_table(path)?,
        None => toml::Table::new(),
    };
    apply_set_values(&mut table, &args.set_values)?;
    let file_config = FileConfig::from_table(table)?;

    let sim_file = file_config.simulation.unwrap_or_default();

    let params = match &args.params {
        Some(path) => PhysicsParams::load(path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?,
        None => file_config.physics.unwrap_or_default(),
    };

    let seed = args.seed.or(sim_file.seed).unwrap_or(defaults.seed);
    let ticks = args.ticks.or(sim_file.ticks).unwrap_or(defaults.ticks);
    let dt = args.dt.or(sim_file.dt).unwrap_or(defaults.dt);
    if !(dt.is_finite() && dt > 0.0) {
        return Err(CliError::Config(format!(
            "dt must be a positive number of seconds, got {}",
            dt
        )));
    }
    let temperature = args
        .temperature
        .or(sim_file.temperature)
        .unwrap_or(defaults.temperature);
    let time_scale = args
        .time_scale
        .or(sim_file.time_scale)
        .unwrap_or(defaults.time_scale);
    let magnetic_field = sim_file
        .magnetic_field
        .map(Vector3::from)
        .unwrap_or_else(Vector3::zeros);
    let start_running = sim_file.start_running.unwrap_or(defaults.start_running);

    let simulation = SimulationConfigBuilder::new()
        .params(params)
        .seed(seed)
        .temperature(temperature)
        .time_scale(time_scale)
        .magnetic_field(magnetic_field)
        .start_running(start_running)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let scenario = args.scenario.clone().or_else(|| {
        file_config
            .scenario
            .map(|path| relative_to_config(args.config.as_deref(), path))
    });
    debug!(seed, ticks, dt, ?scenario, "Resolved run configuration.");

    Ok(AppConfig {
        simulation,
        ticks,
        dt,
        scenario,
    })
}

/// A relative path written in a config file is taken relative to that file's directory.
fn relative_to_config(config: Option<&Path>, path: PathBuf) -> PathBuf {
    match config.and_then(Path::parent) {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}

/// Writes each `KEY=VALUE` pair into `table`, creating intermediate tables for dotted keys.
///
/// Values are parsed as TOML (`2.5`, `true`, `[0, 0, 1]`); anything that does not parse is kept
/// as a string.
fn apply_set_values(table: &mut toml::Table, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let path: Vec<&str> = key.trim().split('.').collect();
        if path.iter().any(|segment| segment.is_empty()) {
            return Err(CliError::Config(format!(
                "Invalid configuration key for --set: '{}'",
                key
            )));
        }

        let mut current = &mut *table;
        for segment in &path[..path.len() - 1] {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| toml::Value::Table(toml::Table::new()));
            current = match entry {
                toml::Value::Table(inner) => inner,
                _ => {
                    return Err(CliError::Config(format!(
                        "Cannot set '{}': '{}' is not a table",
                        key, segment
                    )));
                }
            };
        }
        current.insert(path[path.len() - 1].to_string(), parse_value(value_str.trim()));
    }
    Ok(())
}

fn parse_value(raw: &str) -> toml::Value {
    toml::from_str::<toml::Table>(&format!("value = {}", raw))
        .ok()
        .and_then(|mut parsed| parsed.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}
