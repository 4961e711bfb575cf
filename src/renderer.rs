/*
 * Renderer Module
 *
 * This module handles the rendering of the simulation.
 * Ships and particles are turned into colored triangles in simulation space, then
 * mapped through the camera and drawn as a single mesh.
 *
 * Layout:
 * - Ships: head, body, two wings and a tail, rotated by heading
 * - Particles: one quad each, spinning with the frame clock
 */

use nannou::geom::Tri;
use nannou::prelude::*;

use crate::app::Model;
use crate::ecs::{ComponentColumns, EntityStore};
use crate::physics::PARTICLE_KIND;
use crate::ship::Ship;

pub type Vertex = (Vec2, Rgba);
pub type Triangle = [Vertex; 3];

// Half-width of a ship's head; every other hull part is a multiple of it
const HULL_SIDE: f32 = 10.0;
const HULL_GRAY: f32 = 128.0 / 255.0;
const PARTICLE_ALPHA: f32 = 64.0 / 255.0;

// Rotate `point` by `angle` radians around `pivot`
pub fn rotate_2d(point: Vec2, angle: f32, pivot: Vec2) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let offset = point - pivot;
    vec2(
        offset.x * cos - offset.y * sin + pivot.x,
        offset.x * sin + offset.y * cos + pivot.y,
    )
}

/// Hull outline of a ship as seven triangles. The head takes the ship's color,
/// the rest of the hull is gray.
pub fn ship_triangles(ship: &Ship) -> Vec<Triangle> {
    let pivot = ship.position.truncate();
    let s = HULL_SIDE;
    let at = |dx: f32, dy: f32| rotate_2d(pivot + vec2(dx, dy), ship.heading, pivot);

    let head = rgba(
        ship.color.red as f32 / 255.0,
        ship.color.green as f32 / 255.0,
        ship.color.blue as f32 / 255.0,
        1.0,
    );
    let gray = rgba(HULL_GRAY, HULL_GRAY, HULL_GRAY, 1.0);

    let tip = at(2.0 * s, 0.0);
    let right = at(0.0, s);
    let left = at(0.0, -s);

    let ul = at(-1.5 * s, -2.0 * s);
    let ur = at(0.0, -2.0 * s);
    let lr = at(0.0, 2.0 * s);
    let ll = at(-1.5 * s, 2.0 * s);

    let left_wing = at(-1.5 * s, -3.0 * s);
    let right_wing = at(-1.5 * s, 3.0 * s);

    let tail_front = at(-1.5 * s, 0.0);
    let tail_back = at(-3.0 * s, 0.0);
    let tail_left = at(-3.5 * s, -1.5 * s);
    let tail_right = at(-3.5 * s, 1.5 * s);

    vec![
        [(tip, head), (right, head), (left, head)],
        [(ul, gray), (ur, gray), (ll, gray)],
        [(ur, gray), (lr, gray), (ll, gray)],
        [(left_wing, gray), (ul, gray), (ur, gray)],
        [(right_wing, gray), (ll, gray), (lr, gray)],
        [(tail_front, gray), (tail_back, gray), (tail_left, gray)],
        [(tail_front, gray), (tail_back, gray), (tail_right, gray)],
    ]
}

// Append two triangles per particle; each quad spins by `clock * spin` around its center
pub fn particle_triangles(columns: &ComponentColumns, clock: f32, out: &mut Vec<Triangle>) {
    out.reserve(columns.position.len() * 2);

    let rows = columns
        .position
        .iter()
        .zip(&columns.size)
        .zip(&columns.color)
        .zip(&columns.angular_velocity);

    for (((position, size), color), spin) in rows {
        let center = position.truncate();
        let angle = clock * spin.z;
        let tint = rgba(color.x / 255.0, color.y / 255.0, color.z / 255.0, PARTICLE_ALPHA);
        let corner = |dx: f32, dy: f32| (rotate_2d(center + vec2(dx, dy), angle, center), tint);

        let ul = corner(-size.x, -size.y);
        let ur = corner(size.x, -size.y);
        let lr = corner(size.x, size.y);
        let ll = corner(-size.x, size.y);

        out.push([ul, ur, lr]);
        out.push([ul, lr, ll]);
    }
}

/// Everything drawn in one frame: whatever particle population the store holds, then
/// the ships on top.
pub fn scene_triangles(ships: &[Ship], store: &EntityStore, clock: f32) -> Vec<Triangle> {
    let mut triangles = Vec::new();
    if let Some(columns) = store.columns(PARTICLE_KIND) {
        particle_triangles(columns, clock, &mut triangles);
    }
    for ship in ships {
        triangles.extend(ship_triangles(ship));
    }
    triangles
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let triangles = scene_triangles(&model.ships, &model.store, model.spin_clock);

    let camera = &model.camera;
    draw.mesh().tris_colored(triangles.into_iter().map(|triangle| {
        Tri(triangle.map(|(point, color)| (camera.world_to_screen(point).extend(0.0), color)))
    }));

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("Failed to draw frame: {:?}", err);
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("Failed to draw overlay: {:?}", err);
    }
}
