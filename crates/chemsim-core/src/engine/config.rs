use crate::core::forcefield::params::{ParamLoadError, PhysicsParams};
use crate::core::models::system::DEFAULT_TEMPERATURE;
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("Invalid physics parameters: {0}")]
    InvalidParams(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub params: PhysicsParams,
    /// Seed for the thermal-noise and dissociation random source.
    pub seed: u64,
    pub temperature: f64,
    pub magnetic_field: Vector3<f64>,
    pub time_scale: f64,
    pub start_running: bool,
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    params: Option<PhysicsParams>,
    seed: Option<u64>,
    temperature: Option<f64>,
    magnetic_field: Option<Vector3<f64>>,
    time_scale: Option<f64>,
    start_running: Option<bool>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(mut self, params: PhysicsParams) -> Self {
        self.params = Some(params);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn magnetic_field(mut self, field: Vector3<f64>) -> Self {
        self.magnetic_field = Some(field);
        self
    }
    pub fn time_scale(mut self, scale: f64) -> Self {
        self.time_scale = Some(scale);
        self
    }
    pub fn start_running(mut self, running: bool) -> Self {
        self.start_running = Some(running);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let seed = self.seed.ok_or(ConfigError::MissingParameter("seed"))?;

        let params = self.params.unwrap_or_default();
        params.validate().map_err(|e| match e {
            ParamLoadError::Invalid { name, value } => {
                ConfigError::InvalidParameter { name, value }
            }
            other => ConfigError::InvalidParams(other.to_string()),
        })?;

        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        check_non_negative("temperature", temperature)?;

        let time_scale = self.time_scale.unwrap_or(1.0);
        check_non_negative("time_scale", time_scale)?;

        let magnetic_field = self.magnetic_field.unwrap_or_else(Vector3::zeros);
        if let Some(&bad) = magnetic_field.iter().find(|c| !c.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "magnetic_field",
                value: bad,
            });
        }

        Ok(SimulationConfig {
            params,
            seed,
            temperature,
            magnetic_field,
            time_scale,
            start_running: self.start_running.unwrap_or(true),
        })
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fails_without_seed() {
        let result = SimulationConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("seed")));
    }

    #[test]
    fn build_applies_defaults() {
        let config = SimulationConfigBuilder::new().seed(7).build().unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.magnetic_field, Vector3::zeros());
        assert!(config.start_running);
        assert_eq!(config.params, PhysicsParams::default());
    }

    #[test]
    fn build_uses_explicit_values() {
        let config = SimulationConfigBuilder::new()
            .seed(1)
            .temperature(1200.0)
            .time_scale(0.5)
            .magnetic_field(Vector3::new(0.0, 0.0, 3.0))
            .start_running(false)
            .build()
            .unwrap();
        assert_eq!(config.temperature, 1200.0);
        assert_eq!(config.time_scale, 0.5);
        assert_eq!(config.magnetic_field.z, 3.0);
        assert!(!config.start_running);
    }

    #[test]
    fn build_rejects_negative_temperature_and_time_scale() {
        let result = SimulationConfigBuilder::new()
            .seed(1)
            .temperature(-5.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "temperature",
                ..
            })
        ));

        let result = SimulationConfigBuilder::new()
            .seed(1)
            .time_scale(f64::NAN)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "time_scale",
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_invalid_params() {
        let mut params = PhysicsParams::default();
        params.integration.max_dt = -1.0;
        let result = SimulationConfigBuilder::new().seed(1).params(params).build();
        assert_eq!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "integration.max-dt",
                value: -1.0
            })
        );
    }

    #[test]
    fn build_rejects_non_finite_field() {
        let result = SimulationConfigBuilder::new()
            .seed(1)
            .magnetic_field(Vector3::new(0.0, f64::INFINITY, 0.0))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "magnetic_field",
                ..
            })
        ));
    }
}
