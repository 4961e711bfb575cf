/*
 * UI Module
 *
 * This module builds the egui overlay: simulation counters, the player's control
 * mode, and the particle field switches. Change detection is handled by
 * SimulationParams; the overlay only edits the values.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::input::ControlMode;
use crate::params::{ParamChanges, SimulationParams};

// Update the UI and report what the user changed this frame
pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> ParamChanges {
    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Birds of Pray")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Player Ship", |ui| {
                for mode in ControlMode::ALL {
                    ui.radio_value(&mut params.player_mode, mode, mode.label());
                }
                ui.label("Tab cycles modes, WASD flies in keyboard mode");
                ui.label(format!("Pilot: {}", debug_info.player_agent.unwrap_or("none")));
                ui.label(format!("Speed: {:.4}", debug_info.player_speed));
            });

            ui.collapsing("Particle Field", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_particles, SimulationParams::get_num_particles_range())
                        .text("Number of Particles"),
                );
                ui.checkbox(&mut params.enable_field, "Enable Field");
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Processing");
            });

            if params.show_debug {
                ui.separator();
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time_ms()));
                ui.label(format!("dt: {:.3}", debug_info.dt));
                ui.label(format!("Ships: {}", debug_info.ship_count));
                ui.label(format!("Particles: {}", debug_info.particle_count));
                ui.label(format!("Respawns: {}", debug_info.respawns_last_frame));
            }

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    params.detect_changes()
}
