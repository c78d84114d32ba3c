//! Collision response: velocity updates applied once a contact is detected.
//!
//! Detection lives on `Ball`; these functions only rewrite velocities.

use glam::Vec3;

use crate::components::ball::Ball;
use crate::core::numeric::is_zero;

/// Equal-mass elastic response between two touching balls.
///
/// Each velocity is split into a component along the center-to-center normal
/// and a tangential remainder. The normal components are swapped; each ball
/// keeps its own tangential component. Concentric balls have no normal and are
/// left unchanged.
pub fn exchange_normal_velocities(a: &mut Ball, b: &mut Ball) {
    let offset = a.center - b.center;
    let distance = offset.length();
    if is_zero(distance) {
        return;
    }
    let normal = offset / distance;

    let normal_a = a.velocity.dot(normal) * normal;
    let normal_b = b.velocity.dot(normal) * normal;
    let tangent_a = a.velocity - normal_a;
    let tangent_b = b.velocity - normal_b;

    a.velocity = tangent_a + normal_b;
    b.velocity = tangent_b + normal_a;
}

/// Unit reflection of `direction` about `surface_normal`.
///
/// `normalize(d) − 2 · (d·n)/(|d||n|) · normalize(n)`. Neither input needs to
/// be normalized. Degenerate inputs return `Vec3::ZERO`.
pub fn reflect(direction: Vec3, surface_normal: Vec3) -> Vec3 {
    let len_d = direction.length();
    let len_n = surface_normal.length();
    if is_zero(len_d) || is_zero(len_n) {
        return Vec3::ZERO;
    }
    direction / len_d - 2.0 * (direction.dot(surface_normal) / (len_d * len_n)) * (surface_normal / len_n)
}

/// Bounce a ball off a static surface at `contact`.
///
/// The velocity is reflected about `center − contact` and rescaled to the
/// original speed. A resting ball or a contact at the center leaves the
/// velocity unchanged.
pub fn reflect_off_contact(ball: &mut Ball, contact: Vec3) {
    let speed = ball.velocity.length();
    let normal = ball.center - contact;
    if is_zero(speed) || is_zero(normal.length()) {
        return;
    }
    ball.velocity = reflect(ball.velocity, normal) * speed;
}
