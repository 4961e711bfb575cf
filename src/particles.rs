/*
 * Particles Module
 *
 * Gives a freshly created population its starting attributes and runs the
 * time-to-live countdown. Expired particles are respawned in place: their rows are
 * rewritten, never removed, so the columns keep their length for the whole run.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::bounds::Bounds;
use crate::ecs::{EntityKind, EntityStore};

// Lifetime handed out at spawn and at every respawn
const INITIAL_TTL: u32 = 500;
const INITIAL_TTL_SPREAD: u32 = 10;
const RESPAWN_TTL: u32 = 3000;
const RESPAWN_TTL_SPREAD: u32 = 20;

// Every respawned particle starts from the origin with this drift
const RESPAWN_DRIFT_X: f32 = 0.025;
const RESPAWN_DRIFT_Y: f32 = 0.001;

const BASE_SIDE: f32 = 1.5;

/// Scatter a population over `bounds` with randomized color, drift, size and spin.
pub fn seed_population<R: Rng>(store: &mut EntityStore, kind: EntityKind, bounds: Bounds, rng: &mut R) {
    let Some((handles, columns)) = store.population_mut(kind) else {
        return;
    };

    for color in &mut columns.color {
        *color = vec3(0.0, 64.0 + 128.0 * rng.gen::<f32>(), 0.0);
    }

    for velocity in &mut columns.velocity {
        *velocity = vec3(0.01 * rng.gen::<f32>(), 0.1 * rng.gen::<f32>(), 0.0);
    }

    for position in &mut columns.position {
        position.x = bounds.width * rng.gen::<f32>();
        position.y = bounds.height * rng.gen::<f32>();
    }

    for size in &mut columns.size {
        *size = vec3(
            BASE_SIDE + rng.gen::<f32>() * BASE_SIDE,
            BASE_SIDE + rng.gen::<f32>() * BASE_SIDE,
            0.0,
        );
    }

    for spin in &mut columns.angular_velocity {
        *spin = vec3(0.0, 0.0, 1.0 + 0.1 * rng.gen::<f32>());
    }

    for handle in handles.iter_mut() {
        handle.ttl = INITIAL_TTL + INITIAL_TTL_SPREAD * rng.gen_range(0..=100);
    }

    log::debug!("Seeded {} {:?} entities", handles.len(), kind);
}

/// Count every entity's ttl down by one and respawn the ones that ran out.
/// Returns how many respawned.
pub fn age_population<R: Rng>(store: &mut EntityStore, kind: EntityKind, rng: &mut R) -> usize {
    let Some((handles, columns)) = store.population_mut(kind) else {
        return 0;
    };
    let mut respawned = 0;

    for (i, handle) in handles.iter_mut().enumerate() {
        if handle.ttl == 0 {
            // z drifts under the well pull while alive; a respawn starts it over
            if let (Some(position), Some(velocity)) = (columns.position.get_mut(i), columns.velocity.get_mut(i)) {
                *position = Vec3::ZERO;
                *velocity = vec3(RESPAWN_DRIFT_X, RESPAWN_DRIFT_Y, 0.0);
            }
            handle.ttl = RESPAWN_TTL + RESPAWN_TTL_SPREAD * rng.gen_range(0..100);
            respawned += 1;
        } else {
            handle.ttl -= 1;
        }
    }

    respawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Component;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn population(count: usize) -> EntityStore {
        let mut store = EntityStore::new();
        store.create_entities(EntityKind::Square, vec3(0.0, 1.0, 0.0), count);
        store
    }

    #[test]
    fn test_seeded_population_fits_bounds() {
        let bounds = Bounds::new(640.0, 480.0);
        let mut store = population(500);
        let mut rng = SmallRng::seed_from_u64(1);
        seed_population(&mut store, EntityKind::Square, bounds, &mut rng);

        for position in store.components(EntityKind::Square, Component::Position) {
            assert!(position.x >= 0.0 && position.x <= 640.0);
            assert!(position.y >= 0.0 && position.y <= 480.0);
        }
        for size in store.components(EntityKind::Square, Component::Size) {
            assert!(size.x >= 1.5 && size.x <= 3.0);
            assert!(size.y >= 1.5 && size.y <= 3.0);
        }
        for color in store.components(EntityKind::Square, Component::Color) {
            assert_eq!(color.x, 0.0);
            assert!(color.y >= 64.0 && color.y <= 192.0);
        }
        for handle in store.entities(EntityKind::Square) {
            assert!(handle.ttl >= 500 && handle.ttl <= 1500);
            assert_eq!(handle.ttl % 10, 0);
        }
    }

    #[test]
    fn test_aging_counts_down() {
        let mut store = population(3);
        let mut rng = SmallRng::seed_from_u64(2);
        for handle in store.entities_mut(EntityKind::Square).iter_mut() {
            handle.ttl = 5;
        }

        let respawned = age_population(&mut store, EntityKind::Square, &mut rng);
        assert_eq!(respawned, 0);
        assert!(store.entities(EntityKind::Square).iter().all(|handle| handle.ttl == 4));
    }

    #[test]
    fn test_expired_respawns_in_place() {
        let mut store = population(4);
        let mut rng = SmallRng::seed_from_u64(3);
        store.components_mut(EntityKind::Square, Component::Position)[2] = vec3(300.0, 200.0, 42.0);
        store.components_mut(EntityKind::Square, Component::Velocity)[2] = vec3(3.0, 3.0, -0.5);
        for handle in store.entities_mut(EntityKind::Square).iter_mut() {
            handle.ttl = 1;
        }
        store.entities_mut(EntityKind::Square)[2].ttl = 0;

        let respawned = age_population(&mut store, EntityKind::Square, &mut rng);
        assert_eq!(respawned, 1);

        let handle = store.entities(EntityKind::Square)[2];
        assert!(handle.ttl >= 3000 && handle.ttl <= 3000 + 20 * 99);
        assert_eq!(store.components(EntityKind::Square, Component::Position)[2], Vec3::ZERO);
        assert_eq!(
            store.components(EntityKind::Square, Component::Velocity)[2],
            vec3(0.025, 0.001, 0.0)
        );
        assert_eq!(store.len(EntityKind::Square), 4);
        assert_eq!(store.columns(EntityKind::Square).and_then(|c| c.rows()), Some(4));
    }

    #[test]
    fn test_marker_kind_is_left_alone() {
        let mut store = EntityStore::new();
        store.create_entities(EntityKind::Marker, Vec3::ZERO, 2);
        let mut rng = SmallRng::seed_from_u64(4);

        seed_population(&mut store, EntityKind::Marker, Bounds::new(10.0, 10.0), &mut rng);
        assert_eq!(age_population(&mut store, EntityKind::Marker, &mut rng), 0);
        assert!(store.columns(EntityKind::Marker).is_none());
        assert!(store.entities(EntityKind::Marker).iter().all(|handle| handle.ttl == 0));
    }
}
