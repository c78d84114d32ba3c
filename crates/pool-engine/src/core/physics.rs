use glam::Vec3;

use crate::api::config::PhysicsConfig;
use crate::api::types::{ContactEvent, ContactKind, EntityId};
use crate::components::ball::Ball;
use crate::components::table_box::TableBox;
use crate::core::numeric::is_zero;
use crate::core::ray::Ray;
use crate::systems::collision::{exchange_normal_velocities, reflect_off_contact};

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Owns every ball and table edge and advances them one frame at a time.
///
/// Balls and edges are kept in creation order; that order decides which
/// contact a ball resolves when several are possible in the same frame.
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    balls: Vec<Ball>,
    edges: Vec<TableBox>,
    /// Playing surface; loaded with the scene but never collided against.
    surface: Option<TableBox>,
    /// Contacts resolved since the last `clear_contacts`.
    contacts: Vec<ContactEvent>,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.config
    }

    /// Add a ball. Iteration order is insertion order.
    pub fn add_ball(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    /// Add a cushion edge that balls bounce off.
    pub fn add_edge(&mut self, edge: TableBox) {
        self.edges.push(edge);
    }

    pub fn set_surface(&mut self, surface: TableBox) {
        self.surface = Some(surface);
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn edges(&self) -> &[TableBox] {
        &self.edges
    }

    pub fn surface(&self) -> Option<&TableBox> {
        self.surface.as_ref()
    }

    /// Find a ball by its scene name.
    pub fn find_ball(&self, name: &str) -> Option<&Ball> {
        self.balls.iter().find(|b| b.name == name)
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Contacts recorded since the last clear.
    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    pub fn clear_contacts(&mut self) {
        self.contacts.clear();
    }

    /// Whether any ball is still moving.
    pub fn is_in_motion(&self) -> bool {
        self.balls
            .iter()
            .any(|b| !is_zero(b.speed()))
    }

    /// Advance the simulation by one frame.
    ///
    /// For each ball in order: resolve at most one contact (first a ball with
    /// a later index, otherwise the first edge it overlaps), then integrate
    /// its free motion exactly once. A ball that bounced off another ball
    /// this frame does not also test the edges.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let cooldown = self.config.hit_cooldown;

        for i in 0..self.balls.len() {
            let (head, tail) = self.balls.split_at_mut(i + 1);
            let ball = &mut head[i];

            let mut resolved = false;

            // Dynamic: each unordered pair is tested once, from the lower index
            for other in tail.iter_mut() {
                if ball.hits_ball(other, cooldown).is_some() {
                    exchange_normal_velocities(ball, other);
                    log::debug!("{} hit {}", ball.name, other.name);
                    self.contacts.push(ContactEvent {
                        kind: ContactKind::BallBall,
                        ball: ball.id,
                        other: Some(other.id),
                        speed: ball.speed(),
                    });
                    resolved = true;
                    break;
                }
            }

            // Static: the ball's cooldown map is shared with edges, keyed by edge id
            if !resolved {
                for edge in &self.edges {
                    if ball.was_recently_hit(edge.id) {
                        continue;
                    }
                    if let Some(contact) = ball.hits_box(edge) {
                        reflect_off_contact(ball, contact);
                        ball.start_cooldown(edge.id, cooldown);
                        log::debug!("{} bounced off {}", ball.name, edge.name);
                        self.contacts.push(ContactEvent {
                            kind: ContactKind::BallBox,
                            ball: ball.id,
                            other: Some(edge.id),
                            speed: ball.speed(),
                        });
                        break;
                    }
                }
            }

            ball.apply_physics(dt, &self.config);
        }
    }

    /// Strike the ball nearest along `ray` with the configured cue.
    ///
    /// Among balls the ray intersects, the one whose intersection point is
    /// closest to the ray origin wins; ties go to the earlier ball. Returns
    /// the struck ball's id, or `None` if the ray missed every ball.
    pub fn strike(&mut self, ray: &Ray) -> Option<EntityId> {
        let mut nearest: Option<(usize, f32)> = None;
        for (idx, ball) in self.balls.iter().enumerate() {
            if let Some(hit) = ball.hits_ray(ray) {
                let distance = hit.distance(ray.origin);
                if nearest.map_or(true, |(_, best)| distance < best) {
                    nearest = Some((idx, distance));
                }
            }
        }

        let Some((idx, _)) = nearest else {
            log::debug!("cue missed every ball");
            return None;
        };

        let spring_distance = self.config.cue_spring_distance();
        let ball = &mut self.balls[idx];
        ball.spring_forward(ray, spring_distance, &self.config);
        log::debug!("cue struck {} (speed {:.2})", ball.name, ball.speed());

        self.contacts.push(ContactEvent {
            kind: ContactKind::CueStrike,
            ball: ball.id,
            other: None,
            speed: ball.speed(),
        });
        Some(ball.id)
    }

    /// Put every ball back on its initial spot, at rest, with no cooldowns.
    pub fn reset(&mut self) {
        for ball in &mut self.balls {
            ball.reset();
        }
        self.contacts.clear();
        log::info!("reset {} balls", self.balls.len());
    }

    /// Current centers in ball order, for renderers that only need positions.
    pub fn centers(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.balls.iter().map(|b| b.center)
    }
}
