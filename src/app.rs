/*
 * Application Module
 *
 * This module defines the main application model and the per-frame driver.
 * Each frame it:
 * 1. Runs the overlay and applies what the user changed
 * 2. Derives the integration step from the wall-clock time since the last frame
 * 3. Flies every ship, the first one under the player's control mode
 * 4. Sweeps the particle field around the first ship and ages the population
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

use crate::agent::SeedGenerator;
use crate::camera::Camera;
use crate::config::AppConfig;
use crate::debug::DebugInfo;
use crate::ecs::EntityStore;
use crate::input::{self, KeyState};
use crate::params::SimulationParams;
use crate::particles;
use crate::physics::{self, PlayerInput, PARTICLE_KIND};
use crate::renderer::view;
use crate::ship::Ship;
use crate::ui;

// Main model for the application
pub struct Model {
    pub config: AppConfig,
    pub params: SimulationParams,
    pub ships: Vec<Ship>,
    pub store: EntityStore,
    pub rng: SmallRng,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
    // Drives particle spin, advanced once per frame
    pub spin_clock: f32,
    pub last_update_time: Instant,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Falling back to default config: {}", err);
            AppConfig::default()
        }
    };

    let window_id = app
        .new_window()
        .title(&config.window.title)
        .size(config.window.width, config.window.height)
        .view(view)
        .mouse_moved(input::mouse_moved)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to create window");

    let window = app.window(window_id).expect("Window vanished right after creation");
    let egui = Egui::from_window(&window);

    let (seeds, rng) = match config.ships.seed {
        Some(seed) => (SeedGenerator::fixed(seed), SmallRng::seed_from_u64(seed)),
        None => (SeedGenerator::from_clock(), SmallRng::from_entropy()),
    };

    let params = SimulationParams::from_config(&config);

    build_model(config, params, seeds, rng, egui)
}

fn build_model(config: AppConfig, params: SimulationParams, mut seeds: SeedGenerator, mut rng: SmallRng, egui: Egui) -> Model {
    let bounds = config.window_bounds();

    let ships = physics::spawn_fleet(params.num_ships, bounds, config.agent, &mut seeds, &mut rng);
    let store = physics::spawn_particles(params.num_particles, bounds, &mut rng);

    log::info!(
        "Spawned {} ships and {} particles in a {}x{} window",
        ships.len(),
        store.len(PARTICLE_KIND),
        bounds.width,
        bounds.height
    );

    Model {
        camera: Camera::new(bounds),
        config,
        params,
        ships,
        store,
        rng,
        egui,
        debug_info: DebugInfo::default(),
        mouse_position: Vec2::ZERO,
        spin_clock: 0.0,
        last_update_time: Instant::now(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let changes = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if changes.respawn_particles {
        reset_particles(model);
    }
    if changes.player_mode {
        log::info!("Player control mode: {}", model.params.player_mode.label());
    }

    let window_rect = app.window_rect();
    model.camera.resize(window_rect.w(), window_rect.h());

    let now = Instant::now();
    let elapsed = now.duration_since(model.last_update_time);
    model.last_update_time = now;

    if model.params.pause_simulation {
        return;
    }

    let dt = frame_dt(elapsed, model.config.timing.dt_scale, model.config.timing.max_frame_secs);
    let player = PlayerInput {
        mode: model.params.player_mode,
        keys: KeyState::from_app(app),
        pointer: model.camera.screen_to_world(model.mouse_position),
        view: model.camera.view,
    };
    let respawns = step_world(model, &player, dt);

    model.debug_info.dt = dt;
    model.debug_info.ship_count = model.ships.len();
    model.debug_info.particle_count = model.store.len(PARTICLE_KIND);
    model.debug_info.respawns_last_frame = respawns;
    if let Some(player_ship) = model.ships.first() {
        model.debug_info.player_agent = player_ship.agent_kind();
        model.debug_info.player_speed = player_ship.speed;
    }

    log::trace!("{}", model.debug_info.summary());
}

/// Integration step for a frame that took `elapsed`.
/// A long stall (window drag, breakpoint) is capped at `max_frame_secs`.
pub fn frame_dt(elapsed: Duration, dt_scale: f32, max_frame_secs: f32) -> f32 {
    let cap = Duration::from_secs_f32(max_frame_secs.max(0.0));
    elapsed.min(cap).as_nanos() as f32 * dt_scale
}

// Advance ships and particles by one frame; returns how many particles respawned
fn step_world(model: &mut Model, player: &PlayerInput, dt: f32) -> usize {
    let kinematics = model.config.ships.kinematics;
    physics::step_fleet(&mut model.ships, player, dt, &kinematics);

    if let Some(lead) = model.ships.first() {
        if model.params.enable_field {
            physics::step_particles(
                &mut model.store,
                lead.position,
                player.view,
                &model.config.field,
                dt,
                model.params.enable_parallel,
            );
        }
    }

    model.spin_clock += model.config.timing.spin_step;
    particles::age_population(&mut model.store, PARTICLE_KIND, &mut model.rng)
}

// Rebuild the particle population at the overlay's count
fn reset_particles(model: &mut Model) {
    model.store = physics::spawn_particles(model.params.num_particles, model.camera.view, &mut model.rng);
    log::info!("Respawned particle population: {}", model.params.num_particles);
}
