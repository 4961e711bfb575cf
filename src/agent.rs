/*
 * Agent Module
 *
 * Autonomous pilots. An agent looks at its ship once per tick and answers with a
 * steering action and a speed action. The only pilot today is a sticky Markov policy:
 * it rarely changes its mind, so a chosen action keeps applying for many ticks.
 */

use nannou::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SteeringAction {
    #[default]
    Continue,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeedAction {
    #[default]
    Continue,
    Increase,
    Decrease,
}

/// Anything that can fly a ship.
pub trait Agent {
    /// Short name shown in logs and the overlay.
    fn kind(&self) -> &'static str;

    /// Pick this tick's actions for a ship at `position`.
    fn decide(&mut self, position: Vec3) -> (SteeringAction, SpeedAction);
}

/// Thresholds for the Markov pilot, all on a 0..100 roll.
///
/// A gate roll below `*_chance` resamples the action; otherwise the previous action
/// is kept. The choice roll is then split by the `*_below` thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkovPolicy {
    pub steering_chance: u32,
    pub left_below: u32,
    pub right_below: u32,
    pub speed_chance: u32,
    pub increase_below: u32,
    pub decrease_below: u32,
}

impl Default for MarkovPolicy {
    fn default() -> Self {
        Self {
            steering_chance: 2,
            left_below: 33,
            right_below: 66,
            speed_chance: 10,
            increase_below: 30,
            decrease_below: 60,
        }
    }
}

impl MarkovPolicy {
    pub fn steering_fires(&self, gate_roll: u32) -> bool {
        gate_roll < self.steering_chance
    }

    pub fn speed_fires(&self, gate_roll: u32) -> bool {
        gate_roll < self.speed_chance
    }

    pub fn steering_from_roll(&self, roll: u32) -> SteeringAction {
        if roll < self.left_below {
            SteeringAction::Left
        } else if roll < self.right_below {
            SteeringAction::Right
        } else {
            SteeringAction::Continue
        }
    }

    pub fn speed_from_roll(&self, roll: u32) -> SpeedAction {
        if roll < self.increase_below {
            SpeedAction::Increase
        } else if roll < self.decrease_below {
            SpeedAction::Decrease
        } else {
            SpeedAction::Continue
        }
    }
}

/// Hands out agent seeds.
///
/// Every seed mixes an increasing counter with a time stamp, so two agents built in the
/// same run differ and two runs differ. `fixed` swaps the clock for a constant base,
/// which makes the whole seed sequence reproducible.
#[derive(Debug, Clone)]
pub struct SeedGenerator {
    counter: u64,
    base: Option<u64>,
}

impl SeedGenerator {
    pub fn from_clock() -> Self {
        Self { counter: 0, base: None }
    }

    pub fn fixed(base: u64) -> Self {
        Self { counter: 0, base: Some(base) }
    }

    pub fn next_seed(&mut self) -> u64 {
        self.counter += 1;
        let stamp = self.base.unwrap_or_else(clock_nanos);
        stamp ^ self.counter.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    // Number of seeds issued so far
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl Default for SeedGenerator {
    fn default() -> Self {
        Self::from_clock()
    }
}

fn clock_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

pub struct MarkovAgent {
    policy: MarkovPolicy,
    seeds: SmallRng,
    last_steering: SteeringAction,
    last_speed: SpeedAction,
}

impl MarkovAgent {
    pub fn new(seeds: &mut SeedGenerator) -> Self {
        Self::with_policy(seeds, MarkovPolicy::default())
    }

    pub fn with_policy(seeds: &mut SeedGenerator, policy: MarkovPolicy) -> Self {
        Self::from_seed(seeds.next_seed(), policy)
    }

    pub fn from_seed(seed: u64, policy: MarkovPolicy) -> Self {
        Self {
            policy,
            seeds: SmallRng::seed_from_u64(seed),
            last_steering: SteeringAction::Continue,
            last_speed: SpeedAction::Continue,
        }
    }

    pub fn policy(&self) -> &MarkovPolicy {
        &self.policy
    }

    pub fn last_actions(&self) -> (SteeringAction, SpeedAction) {
        (self.last_steering, self.last_speed)
    }
}

impl Agent for MarkovAgent {
    fn kind(&self) -> &'static str {
        "markov"
    }

    // The position is part of the contract but this policy does not look at it
    fn decide(&mut self, _position: Vec3) -> (SteeringAction, SpeedAction) {
        // A fresh engine per tick, seeded from this agent's own stream
        let mut engine = SmallRng::seed_from_u64(self.seeds.gen());

        let mut steering = self.last_steering;
        if self.policy.steering_fires(engine.gen_range(0..100)) {
            steering = self.policy.steering_from_roll(engine.gen_range(0..100));
        }

        let mut speed = self.last_speed;
        if self.policy.speed_fires(engine.gen_range(0..100)) {
            speed = self.policy.speed_from_roll(engine.gen_range(0..100));
        }

        self.last_steering = steering;
        self.last_speed = speed;
        (steering, speed)
    }
}
