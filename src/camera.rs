/*
 * Camera Module
 *
 * The simulation works in window pixels with the origin at the top-left corner and
 * y pointing down. nannou draws with the origin at the window center and y pointing
 * up. The camera converts between the two.
 */

use nannou::prelude::*;

use crate::bounds::Bounds;

pub struct Camera {
    pub view: Bounds,
}

impl Camera {
    pub fn new(view: Bounds) -> Self {
        Self { view }
    }

    // Convert a point from simulation space to screen space
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        vec2(point.x - self.view.width / 2.0, self.view.height / 2.0 - point.y)
    }

    // Convert a point from screen space to simulation space
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        vec2(point.x + self.view.width / 2.0, self.view.height / 2.0 - point.y)
    }

    // Keep the mapping in step with the window
    pub fn resize(&mut self, width: f32, height: f32) {
        self.view = Bounds::new(width, height);
    }
}
