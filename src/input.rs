/*
 * Input Module
 *
 * This module handles user input events for the ship simulation.
 * Input is only ever polled: the frame driver reads the latest pointer position and
 * the set of held keys, it never waits on them.
 *
 * Features:
 * - Pointer tracking for the pointer-driven ship
 * - WASD key snapshot for the keyboard-driven ship
 * - Escape to quit, Tab to cycle the player's control mode, Space to pause
 */

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

use crate::app::Model;

/// How the player ship is flown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    #[default]
    Autonomous,
    Pointer,
    Keyboard,
}

impl ControlMode {
    pub const ALL: [ControlMode; 3] = [ControlMode::Autonomous, ControlMode::Pointer, ControlMode::Keyboard];

    pub fn next(self) -> Self {
        match self {
            ControlMode::Autonomous => ControlMode::Pointer,
            ControlMode::Pointer => ControlMode::Keyboard,
            ControlMode::Keyboard => ControlMode::Autonomous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlMode::Autonomous => "Autonomous",
            ControlMode::Pointer => "Pointer",
            ControlMode::Keyboard => "Keyboard",
        }
    }
}

/// Which flight keys are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub thrust: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl KeyState {
    pub fn from_app(app: &App) -> Self {
        let down = &app.keys.down;
        Self {
            thrust: down.contains(&Key::W),
            brake: down.contains(&Key::S),
            turn_left: down.contains(&Key::A),
            turn_right: down.contains(&Key::D),
        }
    }
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;
}

// Key pressed event handler
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Escape => {
            log::info!("Escape pressed, closing");
            app.quit();
        }
        Key::Tab => {
            model.params.player_mode = model.params.player_mode.next();
            log::info!("Player control mode: {}", model.params.player_mode.label());
        }
        Key::Space => {
            model.params.pause_simulation = !model.params.pause_simulation;
        }
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
