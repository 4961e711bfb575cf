/*
 * Birds of Pray - Module Definitions
 *
 * This file defines the module structure for the ship simulation.
 * The simulation core (agents, ships, entity store, particle field) has no window
 * dependency and can be driven headless; the app, input, renderer and ui modules
 * wire it into a nannou window.
 */

// Re-export key components for easier access
pub use agent::{Agent, MarkovAgent, MarkovPolicy, SeedGenerator, SpeedAction, SteeringAction};
pub use app::Model;
pub use bounds::Bounds;
pub use camera::Camera;
pub use config::{AppConfig, ConfigError};
pub use debug::DebugInfo;
pub use ecs::{Component, EntityHandle, EntityKind, EntityStore};
pub use params::{FieldParams, ShipParams, SimulationParams};
pub use ship::Ship;

// Define modules
pub mod agent;
pub mod app;
pub mod bounds;
pub mod camera;
pub mod config;
pub mod debug;
pub mod ecs;
pub mod field;
pub mod input;
pub mod params;
pub mod particles;
pub mod physics;
pub mod renderer;
pub mod ship;
pub mod ui;
