/*
 * Field Module
 *
 * Moves the particle population through a vector field: every gravity well pulls,
 * the ship pushes away. Each particle only reads shared, read-only inputs (wells,
 * ship position) and writes its own slot, so the sweep is split into chunks and run
 * on the rayon pool.
 *
 * Both distance terms are softened with +1 in the denominator; a particle sitting
 * exactly on a well or on the ship stays finite.
 */

use nannou::prelude::*;
use rayon::prelude::*;

use crate::bounds::Bounds;
use crate::params::FieldParams;

/// A single well at the center of `bounds`. z carries the well strength.
pub fn default_wells(bounds: Bounds, strength: f32) -> Vec<Vec3> {
    let center = bounds.center();
    vec![vec3(center.x, center.y, strength)]
}

/// Shared inputs of one sweep.
#[derive(Debug, Clone, Copy)]
pub struct FieldInputs<'a> {
    pub wells: &'a [Vec3],
    pub ship_position: Vec3,
    pub bounds: Bounds,
    pub params: &'a FieldParams,
    pub dt: f32,
}

// Softened pull of all wells on a particle at `position`.
// The offset keeps its z term (well.z is the strength), so particle z drifts while a
// particle lives. Nothing reads z and respawn resets it.
#[inline]
pub fn well_pull(position: Vec3, wells: &[Vec3]) -> Vec3 {
    let mut pull = Vec3::ZERO;
    for well in wells {
        let offset = vec3(position.x - well.x, position.y - well.y, position.z - well.z);
        let denominator = 1.0 + offset.x * offset.x + offset.y * offset.y;
        pull += well.z * offset / denominator;
    }
    pull
}

// Softened push away from the ship
#[inline]
pub fn ship_deflection(position: Vec3, ship_position: Vec3) -> Vec3 {
    let offset = position - ship_position;
    offset / (1.0 + offset.x * offset.x + offset.y * offset.y)
}

#[inline]
pub fn step_particle(position: &mut Vec3, velocity: &mut Vec3, inputs: &FieldInputs) {
    let pull = well_pull(*position, inputs.wells);
    let deflect = ship_deflection(*position, inputs.ship_position);

    *velocity *= inputs.params.friction;
    *velocity -= inputs.params.gravity * pull;
    *velocity += inputs.params.ship_gravity_factor * deflect;

    *position += inputs.dt * *velocity;
    *position = inputs.bounds.wrap(*position);
}

/// Advance every particle once. `positions` and `velocities` must be the same length.
pub fn step(positions: &mut [Vec3], velocities: &mut [Vec3], inputs: &FieldInputs, parallel: bool) {
    debug_assert_eq!(positions.len(), velocities.len());

    if parallel {
        // One chunk per worker keeps the number of tasks small
        let chunk_size = std::cmp::max(positions.len() / rayon::current_num_threads(), 1);

        positions
            .par_chunks_mut(chunk_size)
            .zip(velocities.par_chunks_mut(chunk_size))
            .for_each(|(position_chunk, velocity_chunk)| {
                for (position, velocity) in position_chunk.iter_mut().zip(velocity_chunk.iter_mut()) {
                    step_particle(position, velocity, inputs);
                }
            });
    } else {
        for (position, velocity) in positions.iter_mut().zip(velocities.iter_mut()) {
            step_particle(position, velocity, inputs);
        }
    }
}
