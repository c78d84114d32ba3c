use std::collections::HashMap;

use glam::{Mat4, Vec3};

use crate::api::config::PhysicsConfig;
use crate::api::types::EntityId;
use crate::components::table_box::TableBox;
use crate::core::numeric::{is_neg, is_pos, is_zero};
use crate::core::ray::Ray;
use crate::core::roots::{quadratic_roots, Roots};
use crate::core::timer::CountdownTimer;

/// A movable pool ball.
///
/// Owns its own integration (friction + translation) and intersection tests.
/// `radius` and the reset position are fixed at construction. The cooldown map
/// only grows: a key, once inserted, stays until `reset`, and an entry whose
/// timer reached zero means "no suppression".
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: EntityId,
    /// Name from the scene description (e.g. "cueBall").
    pub name: String,
    /// Current world position of the centroid.
    pub center: Vec3,
    /// Current linear velocity in units per second.
    pub velocity: Vec3,
    initial_center: Vec3,
    radius: f32,
    /// Accumulated translation since the last reset, for the renderer.
    transform: Mat4,
    /// Other entity -> cooldown during which contact with it is ignored.
    recently_hit: HashMap<EntityId, CountdownTimer>,
}

impl Ball {
    pub fn new(id: EntityId, name: impl Into<String>, center: Vec3, radius: f32) -> Self {
        Self {
            id,
            name: name.into(),
            center,
            velocity: Vec3::ZERO,
            initial_center: center,
            radius,
            transform: Mat4::IDENTITY,
            recently_hit: HashMap::new(),
        }
    }

    /// Builder: start with a velocity.
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn initial_center(&self) -> Vec3 {
        self.initial_center
    }

    /// Translation accumulated since the last reset, composed frame by frame.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    // -- Cooldown bookkeeping --

    /// Whether contact with `other` is currently suppressed.
    /// A missing entry means no suppression.
    pub fn was_recently_hit(&self, other: EntityId) -> bool {
        self.recently_hit
            .get(&other)
            .is_some_and(CountdownTimer::is_ticking)
    }

    /// Start (or restart) the cooldown against `other`.
    pub fn start_cooldown(&mut self, other: EntityId, duration: f32) {
        self.recently_hit
            .insert(other, CountdownTimer::started(duration));
    }

    /// Number of entities this ball has a cooldown entry for.
    pub fn cooldown_count(&self) -> usize {
        self.recently_hit.len()
    }

    // -- Intersection queries --

    /// Sphere/sphere overlap test.
    ///
    /// Returns a contact reference point one unit from this ball's center
    /// towards `other` (used only to orient the contact normal), and starts a
    /// cooldown of `cooldown` seconds against `other`. Suppressed pairs never hit.
    pub fn hits_ball(&mut self, other: &Ball, cooldown: f32) -> Option<Vec3> {
        if self.was_recently_hit(other.id) {
            return None;
        }
        if self.center.distance(other.center) > self.radius + other.radius {
            return None;
        }

        let contact = (other.center - self.center).normalize_or_zero() + self.center;
        self.start_cooldown(other.id, cooldown);
        Some(contact)
    }

    /// The four points on the ball's horizontal equator at ±radius along x and z.
    fn cardinal_points(&self) -> [Vec3; 4] {
        let r = self.radius;
        [
            self.center + Vec3::new(r, 0.0, 0.0),
            self.center + Vec3::new(-r, 0.0, 0.0),
            self.center + Vec3::new(0.0, 0.0, r),
            self.center + Vec3::new(0.0, 0.0, -r),
        ]
    }

    /// Whether any cardinal point lies inside the box footprint.
    pub fn is_hitting_box(&self, table_box: &TableBox) -> bool {
        self.cardinal_points()
            .iter()
            .any(|&p| table_box.contains_point(p))
    }

    /// Ball/box overlap test. Does not consult or start cooldowns.
    ///
    /// The returned point is the ball extreme opposite the penetrated face,
    /// so that `center - point` is the outward reflection normal.
    pub fn hits_box(&self, table_box: &TableBox) -> Option<Vec3> {
        if !self.is_hitting_box(table_box) {
            return None;
        }
        Some(self.box_contact_point(table_box))
    }

    /// Pick the contact point by quadrant of the ball center relative to the box center.
    fn box_contact_point(&self, table_box: &TableBox) -> Vec3 {
        let r = self.radius;
        let box_to_ball = self.center - table_box.center;
        let leftmost = self.center + Vec3::new(-r, 0.0, 0.0);
        let rightmost = self.center + Vec3::new(r, 0.0, 0.0);
        let frontmost = self.center + Vec3::new(0.0, 0.0, r);
        let backmost = self.center + Vec3::new(0.0, 0.0, -r);

        let left_x = table_box.left_x();
        let right_x = table_box.right_x();

        if box_to_ball.x < 0.0 && box_to_ball.z < 0.0 {
            if leftmost.x < left_x { rightmost } else { frontmost }
        } else if box_to_ball.x > 0.0 && box_to_ball.z < 0.0 {
            if rightmost.x > right_x { leftmost } else { frontmost }
        } else if box_to_ball.x > 0.0 && box_to_ball.z > 0.0 {
            if rightmost.x > right_x { leftmost } else { backmost }
        } else {
            // x < 0, z > 0, and every on-axis tie
            if leftmost.x < left_x { rightmost } else { backmost }
        }
    }

    /// Ray/sphere intersection nearest the ray origin, in front of it.
    ///
    /// Substitutes `p(t) = a + t(b − a)` into `|p − c|² = r²` and solves for `t`.
    pub fn hits_ray(&self, ray: &Ray) -> Option<Vec3> {
        let a = ray.origin.as_dvec3();
        let d = ray.direction.as_dvec3();
        let c = self.center.as_dvec3();
        let r = f64::from(self.radius);

        let qa = d.dot(d);
        let qb = 2.0 * d.dot(a - c);
        let qc = (a - c).dot(a - c) - r * r;

        let t = match quadratic_roots(qa, qb, qc) {
            Roots::None => return None,
            Roots::One(t) => {
                if is_neg(t) {
                    return None;
                }
                t
            }
            Roots::Two(t0, t1) => match (is_pos(t0), is_pos(t1)) {
                (true, true) => t0.min(t1),
                (true, false) => t0,
                (false, true) => t1,
                (false, false) => return None,
            },
        };

        Some((a + d * t).as_vec3())
    }

    // -- Physics --

    /// Add the velocity change of a spring-contact cue strike.
    ///
    /// The push acts horizontally, from the ray origin towards the ball center:
    /// `Δv = k · dir · distance · contact_time / mass`.
    pub fn spring_forward(&mut self, ray: &Ray, spring_distance: f32, config: &PhysicsConfig) {
        let mut direction = (self.center - ray.origin).normalize_or_zero();
        direction.y = 0.0;

        if is_zero(config.ball_mass) {
            log::warn!("{}: ignoring cue strike on a massless ball", self.name);
            return;
        }

        self.velocity += (config.spring_constant
            * direction
            * spring_distance
            * config.cue_contact_time)
            / config.ball_mass;
    }

    /// Integrate one frame of free motion.
    ///
    /// Applies linear friction decay while moving, translates the center and
    /// render transform by `velocity · dt`, then ticks every cooldown.
    pub fn apply_physics(&mut self, dt: f32, config: &PhysicsConfig) {
        let mut delta_velocity = Vec3::ZERO;
        if !is_zero(self.velocity.length()) {
            delta_velocity = -config.friction_coefficient * dt * self.velocity;
        }
        self.velocity += delta_velocity;

        let translation = self.velocity * dt;
        self.center += translation;
        self.transform *= Mat4::from_translation(translation);

        for timer in self.recently_hit.values_mut() {
            timer.tick(dt);
        }
    }

    /// Restore the construction state: initial center, identity transform,
    /// zero velocity and no cooldown entries at all.
    pub fn reset(&mut self) {
        self.center = self.initial_center;
        self.transform = Mat4::IDENTITY;
        self.velocity = Vec3::ZERO;
        self.recently_hit.clear();
    }
}
