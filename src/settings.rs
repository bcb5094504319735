use std::time::Duration;

use anyhow::Context;
use config::{Config, ConfigError, Environment, File, FileFormat};
use puzzlebot_kinematics::{DifferentialDrive, Simulator, WHEEL_RADIUS, WHEEL_SEPARATION};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub robot: RobotSettings,
    pub controls: ControlSettings,
    pub animation: AnimationSettings,
}

/// The two physical constants of the drive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RobotSettings {
    pub wheel_radius: f64,
    pub wheel_separation: f64,
}

impl Default for RobotSettings {
    fn default() -> Self {
        RobotSettings {
            wheel_radius: WHEEL_RADIUS,
            wheel_separation: WHEEL_SEPARATION,
        }
    }
}

/// Initial slider positions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub linear_default: f64,
    pub angular_default: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        ControlSettings {
            linear_default: 0.2,
            angular_default: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub frame_interval_ms: u64,
    pub marker_height: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        AnimationSettings {
            frame_interval_ms: 100,
            marker_height: 0.05,
        }
    }
}

impl AnimationSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Settings {
    /// Builds the simulator for the configured robot.
    pub fn simulator(&self) -> anyhow::Result<Simulator> {
        let drive = DifferentialDrive::new(self.robot.wheel_radius, self.robot.wheel_separation)
            .with_context(|| {
                format!(
                    "invalid robot parameters (wheel_radius = {}, wheel_separation = {})",
                    self.robot.wheel_radius, self.robot.wheel_separation
                )
            })?;
        Ok(Simulator::new(drive))
    }
}

/// Loads settings from `path` (optional) layered under `PUZZLEBOT_*` environment variables.
pub fn load_config(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("PUZZLEBOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(|config| config.try_deserialize::<Settings>());

    match settings {
        Ok(settings) => {
            info!(?settings, "Successfully loaded configuration");
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}
