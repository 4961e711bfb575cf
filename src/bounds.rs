/*
 * Bounds Module
 *
 * A rectangle the simulation lives in, anchored at the origin with y pointing down.
 * Ships and particles that leave it are pushed back in with the legacy edge rule:
 * anything past the far edge snaps to 0, anything at or below 0 snaps to the far edge minus one.
 */

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.x >= 0.0 && position.x < self.width && position.y >= 0.0 && position.y < self.height
    }

    // Wrap x and y, leaving z untouched
    pub fn wrap(&self, position: Vec3) -> Vec3 {
        vec3(
            wrap_axis(position.x, self.width),
            wrap_axis(position.y, self.height),
            position.z,
        )
    }
}

// Not a modulo: negative overflow lands on `upper - 1` no matter how far out it went.
// NaN fails the first comparison and lands on 0.
#[inline]
pub fn wrap_axis(value: f32, upper: f32) -> f32 {
    if value < upper {
        if value > 0.0 {
            value
        } else {
            upper - 1.0
        }
    } else {
        0.0
    }
}
