pub struct DefaultsConfig {
    pub seed: u64,
    pub ticks: u64,
    pub dt: f64,
    pub temperature: f64,
    pub time_scale: f64,
    pub start_running: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ticks: 600,
            dt: 1.0 / 60.0,
            temperature: chemsim::core::models::system::DEFAULT_TEMPERATURE,
            time_scale: 1.0,
            start_running: true,
        }
    }
}
