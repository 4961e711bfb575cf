/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation counters to be displayed in the overlay.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - The integration step handed to the simulation
 * - Particle population size and respawns in the last frame
 * - The player ship's pilot and speed
 */

use std::time::Duration;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub dt: f32,
    pub ship_count: usize,
    pub particle_count: usize,
    pub respawns_last_frame: usize,
    pub player_agent: Option<&'static str>,
    pub player_speed: f32,
}

impl DebugInfo {
    pub fn frame_time_ms(&self) -> f64 {
        self.frame_time.as_secs_f64() * 1000.0
    }

    // One-line summary for trace logging
    pub fn summary(&self) -> String {
        format!(
            "fps={:.1} dt={:.3} ships={} particles={} respawns={}",
            self.fps, self.dt, self.ship_count, self.particle_count, self.respawns_last_frame
        )
    }
}
