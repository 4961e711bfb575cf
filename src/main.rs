/*
 * Birds of Pray
 *
 * A fleet of ships flown by stochastic pilots over a field of particles drawn toward
 * a gravity well. The first ship can be taken over with the pointer or the keyboard.
 *
 * Controls:
 * - Tab: cycle the player ship between autonomous, pointer and keyboard control
 * - W/S: thrust and brake, A/D: turn (keyboard control)
 * - Space: pause, Escape: quit
 *
 * Set RUST_LOG=debug (or trace) for more output.
 */

use birds_of_pray::app;

fn main() {
    env_logger::init();
    log::info!("Starting Birds of Pray");

    nannou::app(app::model)
        .update(app::update)
        .run();
}
