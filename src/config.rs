/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ConfigurationError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub passengers: PassengerConfig,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SimulationConfig {
    pub n_elevators: u32,
    pub n_floors: u32,
    pub dwell_time_ms: u64,
    pub frame_time_ms: u64,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DisplayConfig {
    pub enabled: bool,
    pub draw_every: u64,
    pub realtime: bool,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct PassengerConfig {
    pub file: Option<String>,
    pub random: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            n_elevators: 3,
            n_floors: 50,
            dwell_time_ms: 2000,
            frame_time_ms: 16,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            enabled: true,
            draw_every: 1,
            realtime: true,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.n_elevators == 0 {
            return Err(ConfigurationError::InvalidCount {
                what: "n_elevators",
                got: 0,
            });
        }
        if self.n_floors == 0 {
            return Err(ConfigurationError::InvalidCount {
                what: "n_floors",
                got: 0,
            });
        }
        if self.frame_time_ms == 0 {
            return Err(ConfigurationError::InvalidCount {
                what: "frame_time_ms",
                got: 0,
            });
        }
        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> Result<Config, ConfigurationError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_config(path, &config_str)
}

pub fn parse_config(path: &str, config_str: &str) -> Result<Config, ConfigurationError> {
    let config: Config = toml::from_str(config_str).map_err(|e| ConfigurationError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    config.simulation.validate()?;
    Ok(config)
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod config_tests {
    use super::parse_config;
    use crate::shared::ConfigurationError;

    #[test]
    fn test_config_defaults_when_tables_missing() {
        // Act
        let config = parse_config("config.toml", "").unwrap();

        // Assert
        assert_eq!(config.simulation.n_elevators, 3);
        assert_eq!(config.simulation.n_floors, 50);
        assert_eq!(config.simulation.dwell_time_ms, 2000);
        assert_eq!(config.simulation.frame_time_ms, 16);
        assert!(config.display.enabled);
        assert!(config.passengers.file.is_none());
    }

    #[test]
    fn test_config_parses_all_tables() {
        // Arrange
        let text = r#"
            [simulation]
            n_elevators = 2
            n_floors = 10
            dwell_time_ms = 500
            frame_time_ms = 20

            [display]
            enabled = false
            draw_every = 4
            realtime = false

            [passengers]
            file = "passengers.json"
        "#;

        // Act
        let config = parse_config("config.toml", text).unwrap();

        // Assert
        assert_eq!(config.simulation.n_elevators, 2);
        assert_eq!(config.simulation.n_floors, 10);
        assert_eq!(config.simulation.dwell_time_ms, 500);
        assert_eq!(config.simulation.frame_time_ms, 20);
        assert!(!config.display.enabled);
        assert_eq!(config.display.draw_every, 4);
        assert_eq!(config.passengers.file.as_deref(), Some("passengers.json"));
    }

    #[test]
    fn test_config_rejects_zero_elevators() {
        let result = parse_config("config.toml", "[simulation]\nn_elevators = 0\n");
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidCount { what: "n_elevators", .. })
        ));
    }

    #[test]
    fn test_config_rejects_negative_floors() {
        let result = parse_config("config.toml", "[simulation]\nn_floors = -3\n");
        assert!(matches!(result, Err(ConfigurationError::Parse { .. })));
    }
}
