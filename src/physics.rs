/*
 * Physics Module
 *
 * Per-frame simulation steps used by the app:
 * - spawning the fleet and the particle population
 * - flying every ship with its control mode
 * - sweeping the particle population through the well field
 *
 * Nothing in here touches the window, so the whole frame step can run headless.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::agent::{MarkovAgent, MarkovPolicy, SeedGenerator, SpeedAction, SteeringAction};
use crate::bounds::Bounds;
use crate::ecs::{EntityKind, EntityStore};
use crate::field::{self, FieldInputs};
use crate::input::{ControlMode, KeyState};
use crate::params::{FieldParams, ShipParams};
use crate::particles;
use crate::ship::Ship;

/// The field population is stored as squares and drawn as spinning quads.
pub const PARTICLE_KIND: EntityKind = EntityKind::Square;

/// What the player is doing this frame.
#[derive(Debug, Clone, Copy)]
pub struct PlayerInput {
    pub mode: ControlMode,
    pub keys: KeyState,
    // Pointer position in simulation space
    pub pointer: Vec2,
    // Window rectangle; pointer-driven ships wrap here
    pub view: Bounds,
}

// Build `count` ships at random spots inside `bounds`, each with its own Markov pilot
pub fn spawn_fleet<R: Rng>(
    count: usize,
    bounds: Bounds,
    policy: MarkovPolicy,
    seeds: &mut SeedGenerator,
    rng: &mut R,
) -> Vec<Ship> {
    (0..count)
        .map(|_| {
            let color = rgb(rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>());
            let position = vec3(
                rng.gen_range(0.0..bounds.width),
                rng.gen_range(0.0..bounds.height),
                0.0,
            );
            let agent = MarkovAgent::with_policy(seeds, policy);
            Ship::with_agent(position, color, Box::new(agent))
        })
        .collect()
}

// Fresh store holding `count` particles scattered over `bounds`
pub fn spawn_particles<R: Rng>(count: usize, bounds: Bounds, rng: &mut R) -> EntityStore {
    let mut store = EntityStore::new();
    store.create_entities(PARTICLE_KIND, vec3(0.0, 1.0, 0.0), count);
    particles::seed_population(&mut store, PARTICLE_KIND, bounds, rng);
    store
}

// The first ship follows the player's mode; every other ship flies itself
pub fn step_fleet(ships: &mut [Ship], player: &PlayerInput, dt: f32, params: &ShipParams) {
    let mut ships = ships.iter_mut();

    if let Some(player_ship) = ships.next() {
        match player.mode {
            ControlMode::Autonomous => player_ship.update_autonomous(dt, params),
            ControlMode::Pointer => player_ship.update_towards(player.pointer, player.view, dt, params),
            ControlMode::Keyboard => {
                player_ship.handle_keys(&player.keys, params);
                player_ship.apply_actions(dt, SteeringAction::Continue, SpeedAction::Continue, params);
            }
        }
    }

    for ship in ships {
        ship.update_autonomous(dt, params);
    }
}

/// Push the particle population through the field around `ship_position`.
pub fn step_particles(
    store: &mut EntityStore,
    ship_position: Vec3,
    bounds: Bounds,
    params: &FieldParams,
    dt: f32,
    parallel: bool,
) {
    let wells = field::default_wells(bounds, params.well_strength);
    let inputs = FieldInputs {
        wells: &wells,
        ship_position,
        bounds,
        params,
        dt,
    };

    if let Some((_, columns)) = store.population_mut(PARTICLE_KIND) {
        field::step(&mut columns.position, &mut columns.velocity, &inputs, parallel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn player(mode: ControlMode) -> PlayerInput {
        PlayerInput {
            mode,
            keys: KeyState::default(),
            pointer: vec2(400.0, 300.0),
            view: Bounds::new(800.0, 600.0),
        }
    }

    #[test]
    fn test_fleet_spawns_inside_bounds() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut seeds = SeedGenerator::fixed(1);
        let mut rng = SmallRng::seed_from_u64(1);
        let ships = spawn_fleet(10, bounds, MarkovPolicy::default(), &mut seeds, &mut rng);

        assert_eq!(ships.len(), 10);
        assert_eq!(seeds.issued(), 10);
        for ship in &ships {
            assert!(bounds.contains(ship.position));
            assert_eq!(ship.agent_kind(), Some("markov"));
        }
    }

    #[test]
    fn test_pointer_player_moves_toward_pointer() {
        let params = ShipParams::default();
        let mut ships = vec![Ship::new(vec3(100.0, 300.0, 0.0), rgb(255, 255, 255))];
        step_fleet(&mut ships, &player(ControlMode::Pointer), 1.0, &params);
        assert!(ships[0].position.x > 100.0);
        assert!(ships[0].heading.abs() < 1e-6);
    }

    #[test]
    fn test_keyboard_player_coasts_after_nudge() {
        let params = ShipParams::default();
        let mut input = player(ControlMode::Keyboard);
        input.keys.thrust = true;
        let mut ships = vec![Ship::new(vec3(100.0, 100.0, 0.0), rgb(255, 255, 255))];

        step_fleet(&mut ships, &input, 100.0, &params);
        assert_eq!(ships[0].speed, 0.005);
        assert!((ships[0].position.x - 100.5).abs() < 1e-4);
    }

    #[test]
    fn test_particle_step_moves_population() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut store = spawn_particles(64, bounds, &mut rng);
        let before = store.components(PARTICLE_KIND, crate::ecs::Component::Position).to_vec();

        step_particles(&mut store, vec3(10.0, 10.0, 0.0), bounds, &FieldParams::default(), 5.0, true);

        let after = store.components(PARTICLE_KIND, crate::ecs::Component::Position);
        assert_eq!(after.len(), before.len());
        assert!(after.iter().zip(&before).any(|(a, b)| a != b));
        assert!(after.iter().all(|p| bounds.contains(*p)));
    }
}
