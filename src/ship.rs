/*
 * Ship Module
 *
 * This module defines the Ship struct and its kinematics.
 * A ship is flown in exactly one way per tick:
 * 1. Autonomous: its agent picks steering and speed actions
 * 2. Pointer-driven: it turns toward a target and speeds up with distance
 * 3. Action-driven: the caller supplies the actions directly
 * 4. Keyboard: held keys nudge speed or heading, then it coasts
 */

use nannou::prelude::*;

use crate::agent::{Agent, SpeedAction, SteeringAction};
use crate::bounds::Bounds;
use crate::input::KeyState;
use crate::params::ShipParams;

pub struct Ship {
    pub position: Vec3,
    pub velocity: Vec3,
    pub heading: f32,
    pub speed: f32,
    pub acceleration: f32,
    pub color: Rgb<u8>,
    agent: Option<Box<dyn Agent>>,
}

impl Ship {
    pub fn new(position: Vec3, color: Rgb<u8>) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            heading: 0.0,
            speed: 0.0,
            acceleration: 0.0,
            color,
            agent: None,
        }
    }

    pub fn with_agent(position: Vec3, color: Rgb<u8>, agent: Box<dyn Agent>) -> Self {
        Self {
            agent: Some(agent),
            ..Self::new(position, color)
        }
    }

    pub fn agent_kind(&self) -> Option<&'static str> {
        self.agent.as_ref().map(|agent| agent.kind())
    }

    // Let the agent fly; a ship without one just coasts
    pub fn update_autonomous(&mut self, dt: f32, params: &ShipParams) {
        let position = self.position;
        let (steering, speed) = match self.agent.as_mut() {
            Some(agent) => agent.decide(position),
            None => (SteeringAction::Continue, SpeedAction::Continue),
        };
        self.apply_actions(dt, steering, speed, params);
    }

    // Head for `target`, faster the farther away it is. Wraps into `bounds`, not the ship world.
    pub fn update_towards(&mut self, target: Vec2, bounds: Bounds, dt: f32, params: &ShipParams) {
        let offset = target - self.position.truncate();
        self.heading = offset.y.atan2(offset.x);
        self.speed = offset.length_squared() * params.pointer_speed_scale;

        self.integrate(dt);
        self.position = bounds.wrap(self.position);
    }

    pub fn apply_actions(&mut self, dt: f32, steering: SteeringAction, speed: SpeedAction, params: &ShipParams) {
        self.acceleration *= params.acceleration_damping;

        match steering {
            SteeringAction::Left => self.heading -= params.steering_step,
            SteeringAction::Right => self.heading += params.steering_step,
            SteeringAction::Continue => {}
        }

        match speed {
            SpeedAction::Increase => self.acceleration += params.thrust_step,
            SpeedAction::Decrease => self.acceleration -= params.thrust_step,
            SpeedAction::Continue => {}
        }

        self.acceleration = self.acceleration.clamp(-params.max_acceleration, params.max_acceleration);
        self.speed += self.acceleration * dt;

        if self.speed < 0.0 {
            self.speed = 0.0;
            self.acceleration = 0.0;
        }

        self.integrate(dt);
        self.position = params.world.wrap(self.position);
    }

    // First held key wins; keys never combine within a tick
    pub fn handle_keys(&mut self, keys: &KeyState, params: &ShipParams) {
        if keys.thrust {
            self.speed += params.key_thrust;
        } else if keys.brake {
            self.speed *= params.key_brake;
        } else if keys.turn_left {
            self.heading -= params.key_turn;
        } else if keys.turn_right {
            self.heading += params.key_turn;
        }
    }

    fn integrate(&mut self, dt: f32) {
        self.velocity.x = self.speed * self.heading.cos();
        self.velocity.y = self.speed * self.heading.sin();
        self.position += dt * self.velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{MarkovAgent, MarkovPolicy};

    fn ship_at(x: f32, y: f32) -> Ship {
        Ship::new(vec3(x, y, 0.0), rgb(200, 40, 40))
    }

    #[test]
    fn test_continue_with_zero_dt_only_decays_acceleration() {
        let params = ShipParams::default();
        let mut ship = ship_at(100.0, 200.0);
        ship.heading = 0.7;
        ship.speed = 3.0;
        ship.acceleration = 0.0008;

        let mut expected = 0.0008_f32;
        for _ in 0..5 {
            ship.apply_actions(0.0, SteeringAction::Continue, SpeedAction::Continue, &params);
            expected *= 0.9;
            assert_eq!(ship.position, vec3(100.0, 200.0, 0.0));
            assert_eq!(ship.heading, 0.7);
            assert_eq!(ship.speed, 3.0);
            assert!((ship.acceleration - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_steering_steps_heading() {
        let params = ShipParams::default();
        let mut ship = ship_at(10.0, 10.0);
        ship.apply_actions(0.0, SteeringAction::Left, SpeedAction::Continue, &params);
        assert!((ship.heading + 0.1).abs() < 1e-6);
        ship.apply_actions(0.0, SteeringAction::Right, SpeedAction::Continue, &params);
        ship.apply_actions(0.0, SteeringAction::Right, SpeedAction::Continue, &params);
        assert!((ship.heading - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_acceleration_is_clamped() {
        let params = ShipParams::default();
        let mut ship = ship_at(10.0, 10.0);
        ship.acceleration = 0.5;
        ship.apply_actions(1.0, SteeringAction::Continue, SpeedAction::Increase, &params);
        assert_eq!(ship.acceleration, 0.001);
        ship.acceleration = -0.5;
        ship.apply_actions(0.0, SteeringAction::Continue, SpeedAction::Decrease, &params);
        assert_eq!(ship.acceleration, -0.001);
    }

    #[test]
    fn test_negative_speed_stops_the_ship() {
        let params = ShipParams::default();
        let mut ship = ship_at(10.0, 10.0);
        ship.speed = 0.0001;
        ship.acceleration = -0.001;
        ship.apply_actions(10.0, SteeringAction::Continue, SpeedAction::Decrease, &params);
        assert_eq!(ship.speed, 0.0);
        assert_eq!(ship.acceleration, 0.0);
        assert_eq!(ship.position, vec3(10.0, 10.0, 0.0));
    }

    #[test]
    fn test_action_update_wraps_into_ship_world() {
        let params = ShipParams::default();
        let mut ship = ship_at(2559.0, 5.0);
        ship.speed = 1.0;
        ship.apply_actions(10.0, SteeringAction::Continue, SpeedAction::Continue, &params);
        assert_eq!(ship.position.x, 0.0);

        let mut ship = ship_at(5.0, 3.0);
        ship.heading = -PI / 2.0;
        ship.speed = 1.0;
        ship.apply_actions(10.0, SteeringAction::Continue, SpeedAction::Continue, &params);
        assert_eq!(ship.position.y, 1439.0);
    }

    #[test]
    fn test_pointer_mode_heads_for_target() {
        let params = ShipParams::default();
        let bounds = Bounds::new(800.0, 600.0);
        let mut ship = ship_at(100.0, 100.0);
        ship.update_towards(vec2(100.0, 300.0), bounds, 1.0, &params);

        assert!((ship.heading - PI / 2.0).abs() < 1e-6);
        assert!((ship.speed - 200.0 * 200.0 * 0.0000001).abs() < 1e-9);
        assert!(ship.position.y > 100.0);
        assert!(bounds.contains(ship.position));
    }

    #[test]
    fn test_pointer_mode_wraps_into_given_bounds() {
        let params = ShipParams::default();
        let bounds = Bounds::new(800.0, 600.0);
        let mut ship = ship_at(790.0, 300.0);
        ship.update_towards(vec2(2000.0, 300.0), bounds, 1000.0, &params);
        assert_eq!(ship.position.x, 0.0);
    }

    #[test]
    fn test_first_key_wins() {
        let params = ShipParams::default();
        let mut ship = ship_at(0.0, 0.0);
        let keys = KeyState {
            thrust: true,
            brake: true,
            turn_left: true,
            turn_right: true,
        };
        ship.handle_keys(&keys, &params);
        assert_eq!(ship.speed, 0.005);
        assert_eq!(ship.heading, 0.0);

        let brake_and_turn = KeyState { brake: true, turn_left: true, ..KeyState::default() };
        ship.handle_keys(&brake_and_turn, &params);
        assert!((ship.speed - 0.004).abs() < 1e-9);
        assert_eq!(ship.heading, 0.0);

        let right = KeyState { turn_right: true, ..KeyState::default() };
        ship.handle_keys(&right, &params);
        assert!((ship.heading - 0.08).abs() < 1e-9);
    }

    #[test]
    fn test_autonomous_keeps_invariants() {
        let params = ShipParams::default();
        let agent = MarkovAgent::from_seed(99, MarkovPolicy::default());
        let mut ship = Ship::with_agent(vec3(1280.0, 720.0, 0.0), rgb(1, 2, 3), Box::new(agent));
        assert_eq!(ship.agent_kind(), Some("markov"));

        for _ in 0..5000 {
            ship.update_autonomous(160.0, &params);
            assert!(ship.speed >= 0.0);
            assert!(ship.acceleration.abs() <= 0.001);
            assert!(params.world.contains(ship.position));
        }
    }

    #[test]
    fn test_agentless_ship_coasts() {
        let params = ShipParams::default();
        let mut ship = ship_at(50.0, 50.0);
        ship.speed = 0.5;
        ship.update_autonomous(2.0, &params);
        assert!((ship.position.x - 51.0).abs() < 1e-5);
        assert_eq!(ship.agent_kind(), None);
    }
}
