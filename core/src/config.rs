use crate::counter::{COUNTER_DURATION_MS, COUNTER_START_DELAY_MS};
use crate::form::{SUBMIT_DELAY_MS, SUCCESS_HIDE_MS};

/// Timings and switches for the page effects.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub counter_delay_ms: u32,
    pub counter_duration_ms: f64,
    pub submit_delay_ms: u32,
    pub success_hide_ms: u32,
    pub particles_enabled: bool,
    pub carousel_enabled: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            counter_delay_ms: COUNTER_START_DELAY_MS,
            counter_duration_ms: COUNTER_DURATION_MS,
            submit_delay_ms: SUBMIT_DELAY_MS,
            success_hide_ms: SUCCESS_HIDE_MS,
            particles_enabled: true,
            carousel_enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} expects a whole number of milliseconds, got {value:?}")]
    InvalidMillis { key: String, value: String },
    #[error("{key} expects on/off, got {value:?}")]
    InvalidSwitch { key: String, value: String },
}

impl SiteConfig {
    /// Applies recognised query parameters on top of the defaults. Bad values
    /// are reported and leave the default in place; unknown keys are ignored.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> (Self, Vec<ConfigError>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();
        for (key, value) in pairs {
            if let Err(err) = config.apply(key.as_ref(), value.as_ref()) {
                errors.push(err);
            }
        }
        (config, errors)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "counter_ms" => self.counter_duration_ms = f64::from(parse_millis(key, value)?),
            "counter_delay_ms" => self.counter_delay_ms = parse_millis(key, value)?,
            "submit_delay_ms" => self.submit_delay_ms = parse_millis(key, value)?,
            "success_hide_ms" => self.success_hide_ms = parse_millis(key, value)?,
            "fx" => {
                let enabled = parse_switch(key, value)?;
                self.particles_enabled = enabled;
                self.carousel_enabled = enabled;
            }
            "particles" => self.particles_enabled = parse_switch(key, value)?,
            "carousel" => self.carousel_enabled = parse_switch(key, value)?,
            _ => {}
        }
        Ok(())
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidMillis {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_switch(key: &str, value: &str) -> Result<bool, ConfigError> {
    let value_lc = value.trim().to_ascii_lowercase();
    match value_lc.as_str() {
        "on" | "1" | "true" => Ok(true),
        "off" | "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidSwitch {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
