/*
 * Simulation Benchmark
 *
 * This file contains benchmarks for the per-frame simulation work.
 * It measures the particle field sweep (sequential and parallel), the ttl countdown,
 * and a fleet of autonomous ships.
 */

use birds_of_pray::agent::{MarkovPolicy, SeedGenerator};
use birds_of_pray::bounds::Bounds;
use birds_of_pray::input::{ControlMode, KeyState};
use birds_of_pray::params::{FieldParams, ShipParams};
use birds_of_pray::particles;
use birds_of_pray::physics::{self, PlayerInput, PARTICLE_KIND};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nannou::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

const WINDOW: Bounds = Bounds::new(2560.0, 1440.0);

// Benchmark the field sweep at different population sizes
fn bench_field_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_sweep");
    let field = FieldParams::default();

    for num_particles in [1_000, 20_000, 100_000].iter() {
        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, num_particles), num_particles, |b, &n| {
                let mut rng = SmallRng::seed_from_u64(1);
                let mut store = physics::spawn_particles(n, WINDOW, &mut rng);
                let ship = vec3(1280.0, 720.0, 0.0);

                b.iter(|| {
                    physics::step_particles(&mut store, black_box(ship), WINDOW, &field, 160.0, parallel);
                });
            });
        }
    }

    group.finish();
}

// Benchmark the ttl countdown and respawn pass
fn bench_aging(c: &mut Criterion) {
    let mut group = c.benchmark_group("aging");

    for num_particles in [1_000, 20_000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_particles), num_particles, |b, &n| {
            let mut rng = SmallRng::seed_from_u64(2);
            let mut store = physics::spawn_particles(n, WINDOW, &mut rng);

            b.iter(|| black_box(particles::age_population(&mut store, PARTICLE_KIND, &mut rng)));
        });
    }

    group.finish();
}

// Benchmark a fleet flown by Markov agents
fn bench_fleet(c: &mut Criterion) {
    let mut group = c.benchmark_group("fleet");
    let params = ShipParams::default();
    let player = PlayerInput {
        mode: ControlMode::Autonomous,
        keys: KeyState::default(),
        pointer: Vec2::ZERO,
        view: WINDOW,
    };

    for num_ships in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_ships), num_ships, |b, &n| {
            let mut seeds = SeedGenerator::fixed(3);
            let mut rng = SmallRng::seed_from_u64(3);
            let mut ships = physics::spawn_fleet(n, WINDOW, MarkovPolicy::default(), &mut seeds, &mut rng);

            b.iter(|| physics::step_fleet(&mut ships, &player, black_box(160.0), &params));
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_field_sweep, bench_aging, bench_fleet
}

criterion_main!(benches);
