/*
 * Simulation Parameters Module
 *
 * Tuning constants for ships and the particle field, plus the runtime parameters the
 * overlay can change while the simulation runs. Runtime parameters keep a snapshot of
 * their previous values so the app can tell what the overlay touched this frame.
 */

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::config::AppConfig;
use crate::input::ControlMode;

/// Kinematic constants for ships.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipParams {
    pub acceleration_damping: f32,
    pub steering_step: f32,
    pub thrust_step: f32,
    pub max_acceleration: f32,
    // Pointer mode: speed = scale * squared distance to the pointer
    pub pointer_speed_scale: f32,
    pub key_thrust: f32,
    pub key_brake: f32,
    pub key_turn: f32,
    // Action-driven ships wrap here, independent of the window size
    pub world: Bounds,
}

impl Default for ShipParams {
    fn default() -> Self {
        Self {
            acceleration_damping: 0.9,
            steering_step: 0.1,
            thrust_step: 0.000001,
            max_acceleration: 0.001,
            pointer_speed_scale: 0.0000001,
            key_thrust: 0.005,
            key_brake: 0.8,
            key_turn: 0.08,
            world: Bounds::new(2560.0, 1440.0),
        }
    }
}

/// Constants for the particle field sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub friction: f32,
    pub gravity: f32,
    pub ship_gravity_factor: f32,
    pub well_strength: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            friction: 0.9975,
            gravity: 0.025,
            ship_gravity_factor: 0.02,
            well_strength: 1.0,
        }
    }
}

// Parameters for the simulation that can be adjusted via UI
pub struct SimulationParams {
    pub num_ships: usize,
    pub num_particles: usize,
    pub player_mode: ControlMode,
    pub show_debug: bool,
    pub pause_simulation: bool,
    pub enable_parallel: bool,
    pub enable_field: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
struct ParamSnapshot {
    num_particles: usize,
    player_mode: ControlMode,
    show_debug: bool,
    pause_simulation: bool,
    enable_parallel: bool,
    enable_field: bool,
}

/// What the overlay changed since the last snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub respawn_particles: bool,
    pub player_mode: bool,
    pub any: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_ships: 10,
            num_particles: 20_000,
            player_mode: ControlMode::Autonomous,
            show_debug: true,
            pause_simulation: false,
            enable_parallel: true,
            enable_field: true,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    // Startup values from the loaded configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            num_ships: config.ships.count,
            num_particles: if config.particles.enabled { config.particles.count } else { 0 },
            player_mode: config.ships.player_mode,
            ..Self::default()
        }
    }

    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            num_particles: self.num_particles,
            player_mode: self.player_mode,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
            enable_parallel: self.enable_parallel,
            enable_field: self.enable_field,
        });
    }

    // Without a snapshot nothing counts as changed
    pub fn detect_changes(&self) -> ParamChanges {
        let mut changes = ParamChanges::default();

        if let Some(prev) = &self.previous_values {
            changes.respawn_particles = self.num_particles != prev.num_particles;
            changes.player_mode = self.player_mode != prev.player_mode;
            changes.any = changes.respawn_particles
                || changes.player_mode
                || self.show_debug != prev.show_debug
                || self.pause_simulation != prev.pause_simulation
                || self.enable_parallel != prev.enable_parallel
                || self.enable_field != prev.enable_field;
        }

        changes
    }

    pub fn get_num_particles_range() -> std::ops::RangeInclusive<usize> {
        0..=200_000
    }
}
