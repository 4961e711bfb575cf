//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BOP_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::agent::MarkovPolicy;
use crate::bounds::Bounds;
use crate::input::ControlMode;
use crate::params::{FieldParams, ShipParams};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub ships: ShipConfig,
    #[serde(default)]
    pub agent: MarkovPolicy,
    #[serde(default)]
    pub field: FieldParams,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // BOP_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("BOP_").split("__"));

        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        let world = self.ships.kinematics.world;
        if !world.width.is_finite() || !world.height.is_finite() || world.width < 1.0 || world.height < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "ship world must be at least 1x1, got {}x{}",
                world.width, world.height
            )));
        }
        validate_kinematics(&self.ships.kinematics)?;
        if self.timing.dt_scale.is_nan() || self.timing.dt_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "timing.dt_scale must be positive, got {}",
                self.timing.dt_scale
            )));
        }
        if !self.timing.max_frame_secs.is_finite() || self.timing.max_frame_secs <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "timing.max_frame_secs must be positive and finite, got {}",
                self.timing.max_frame_secs
            )));
        }
        Ok(())
    }

    /// Window size as simulation bounds
    pub fn window_bounds(&self) -> Bounds {
        Bounds::new(self.window.width as f32, self.window.height as f32)
    }
}

// Ship constants that feed clamps and speeds must keep speed >= 0 and the clamp range ordered
fn validate_kinematics(kinematics: &ShipParams) -> Result<(), ConfigError> {
    let non_negative = [
        ("max_acceleration", kinematics.max_acceleration),
        ("pointer_speed_scale", kinematics.pointer_speed_scale),
        ("thrust_step", kinematics.thrust_step),
        ("key_thrust", kinematics.key_thrust),
        ("key_brake", kinematics.key_brake),
    ];
    for (name, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "ships.kinematics.{} must be finite and non-negative, got {}",
                name, value
            )));
        }
    }

    let damping = kinematics.acceleration_damping;
    if !(0.0..=1.0).contains(&damping) {
        return Err(ConfigError::Invalid(format!(
            "ships.kinematics.acceleration_damping must be within [0, 1], got {}",
            damping
        )));
    }

    for (name, value) in [("steering_step", kinematics.steering_step), ("key_turn", kinematics.key_turn)] {
        if !value.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "ships.kinematics.{} must be finite, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Birds of Pray".to_string(),
            width: 2560,
            height: 1440,
        }
    }
}

/// Ship fleet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Number of ships, the first one is the player's
    pub count: usize,
    /// How the first ship is flown at startup
    pub player_mode: ControlMode,
    /// Fixed base for agent seeds; unset means seeded from the clock
    pub seed: Option<u64>,
    pub kinematics: ShipParams,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            count: 10,
            player_mode: ControlMode::Autonomous,
            seed: None,
            kinematics: ShipParams::default(),
        }
    }
}

/// Particle population configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// When false the app starts with no particles; the overlay can still add some
    pub enabled: bool,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 20_000,
            enabled: true,
        }
    }
}

/// Frame timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Integration step per elapsed nanosecond
    pub dt_scale: f32,
    /// Particle spin clock advance per frame
    pub spin_step: f32,
    /// Longest frame the integrator will see, in seconds
    pub max_frame_secs: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dt_scale: 0.00001,
            spin_step: 0.01,
            max_frame_secs: 0.25,
        }
    }
}

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape
    Load(Box<figment::Error>),
    /// Values parsed but make no sense together
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(err) => write!(f, "Config load error: {}", err),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(err) => Some(err.as_ref()),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}
