use glam::Vec2;

use crate::api::config::PhysicsConfig;
use crate::api::types::{ContactEvent, EntityId};
use crate::assets::manifest::{SceneError, SceneManifest};
use crate::core::physics::PhysicsWorld;
use crate::input::queue::{buttons, custom, keys, ButtonStates, InputEvent, InputQueue};
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::InstanceBuffer;

/// Default canvas size until the host reports one.
const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1024.0, 768.0);

/// A playable table: the physics world plus the camera that aims the cue.
///
/// Each frame runs in a fixed order: input events (strikes, camera turns,
/// resets), held-key camera movement, the physics step, then the render
/// read-out.
pub struct PoolTable {
    world: PhysicsWorld,
    camera: Camera3D,
    held: ButtonStates,
    /// Last pointer position in normalized device coordinates.
    last_pointer: Option<Vec2>,
    viewport: Vec2,
    instances: InstanceBuffer,
}

impl PoolTable {
    pub fn new(world: PhysicsWorld) -> Self {
        let mut table = Self {
            world,
            camera: Camera3D::table_view(),
            held: ButtonStates::new(),
            last_pointer: None,
            viewport: DEFAULT_VIEWPORT,
            instances: InstanceBuffer::new(),
        };
        table.instances.rebuild(table.world.balls());
        table
    }

    pub fn from_manifest(
        manifest: &SceneManifest,
        config: PhysicsConfig,
    ) -> Result<Self, SceneError> {
        Ok(Self::new(manifest.build_world(config)?))
    }

    /// Build a table from a scene JSON and an optional (possibly partial)
    /// physics config JSON.
    pub fn from_json(scene_json: &str, config_json: Option<&str>) -> Result<Self, SceneError> {
        let config = match config_json {
            Some(json) => PhysicsConfig::from_json(json)?,
            None => PhysicsConfig::default(),
        };
        let manifest = SceneManifest::from_json(scene_json)?;
        Self::from_manifest(&manifest, config)
    }

    /// Run one frame. `dt` is the wall-clock time since the previous frame.
    pub fn update(&mut self, dt: f32, input: &mut InputQueue) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.world.clear_contacts();

        for event in input.drain() {
            self.handle_event(&event, dt);
        }

        self.move_camera(dt);
        self.world.step(dt);
        self.instances.rebuild(self.world.balls());
    }

    /// Apply a single input event.
    pub fn handle_event(&mut self, event: &InputEvent, dt: f32) {
        self.held.record(event);

        match *event {
            InputEvent::PointerDown { button, x, y } => {
                self.last_pointer = Some(self.normalize(x, y));
                if button == buttons::LEFT {
                    self.strike_cue();
                }
            }
            InputEvent::PointerUp { x, y, .. } => {
                self.last_pointer = Some(self.normalize(x, y));
            }
            InputEvent::PointerMove { x, y } => {
                let pointer = self.normalize(x, y);
                if let Some(previous) = self.last_pointer {
                    if self.held.is_button_held(buttons::RIGHT) {
                        self.turn_camera(pointer - previous, dt);
                    }
                }
                self.last_pointer = Some(pointer);
            }
            InputEvent::KeyDown { key_code } if key_code == keys::R => self.reset_all(),
            InputEvent::Custom { kind, a, .. } => match kind {
                custom::SET_STRIKE_POWER => self.set_strike_power(a),
                custom::RESET => self.reset_all(),
                custom::RESET_BALLS => self.reset_balls(),
                custom::STRIKE => {
                    self.strike_cue();
                }
                _ => log::debug!("unhandled custom event kind {kind}"),
            },
            _ => {}
        }
    }

    /// Canvas pixels to [-1, 1] with +y up.
    fn normalize(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            2.0 * x / self.viewport.x - 1.0,
            1.0 - 2.0 * y / self.viewport.y,
        )
    }

    fn turn_camera(&mut self, delta: Vec2, dt: f32) {
        let speed = self.world.config().camera_turn_speed;
        self.camera.turn(-delta.x * speed * dt, delta.y * speed * dt);
    }

    fn move_camera(&mut self, dt: f32) {
        let forward = self.held.axis(keys::ARROW_UP, keys::ARROW_DOWN);
        let right = self.held.axis(keys::ARROW_RIGHT, keys::ARROW_LEFT);
        if forward == 0.0 && right == 0.0 {
            return;
        }
        let step = self.world.config().camera_move_speed * dt;
        self.camera.move_by(forward * step, right * step, 0.0);
    }

    /// Strike along the camera's line of sight.
    pub fn strike_cue(&mut self) -> Option<EntityId> {
        let ray = self.camera.ray();
        self.world.strike(&ray)
    }

    pub fn reset_all(&mut self) {
        self.reset_camera();
        self.reset_balls();
    }

    pub fn reset_camera(&mut self) {
        self.camera.look_at_table();
    }

    pub fn reset_balls(&mut self) {
        self.world.reset();
        self.instances.rebuild(self.world.balls());
    }

    /// Record the canvas size; zero or negative sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    pub fn strike_power(&self) -> f32 {
        self.world.config().strike_power
    }

    pub fn set_strike_power(&mut self, power: f32) {
        self.world.config_mut().set_strike_power(power);
        log::debug!("strike power set to {:.2}", self.strike_power());
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    /// Contacts resolved during the last frame.
    pub fn contacts(&self) -> &[ContactEvent] {
        self.world.contacts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ContactKind;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    // The table camera sits at (0, 40, 40) looking at the origin.
    const SCENE: &str = r#"{
        "entities": [
            { "name": "poolsurface", "center": [0, -1, 0], "extents": [40, 1, 80] },
            { "name": "backFeltEdge", "center": [0, 0, -30], "extents": [40, 2, 2] },
            { "name": "cueBall", "center": [0, 0, 0] },
            { "name": "eightBall", "center": [10, 0, 0] }
        ]
    }"#;

    fn table() -> PoolTable {
        PoolTable::from_json(SCENE, None).unwrap()
    }

    fn press(button: u32) -> InputEvent {
        InputEvent::PointerDown { button, x: 512.0, y: 384.0 }
    }

    #[test]
    fn loads_scene_with_table_camera() {
        let table = table();
        assert_eq!(table.world().ball_count(), 2);
        assert_eq!(table.instances().instance_count(), 2);
        assert!((table.camera().position - Vec3::new(0.0, 40.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn partial_config_json_is_applied() {
        let table = PoolTable::from_json(SCENE, Some(r#"{ "strike_power": 0.2 }"#)).unwrap();
        assert!((table.strike_power() - 0.2).abs() < 1e-6);
        assert_eq!(table.world().config().ball_mass, 0.5);
    }

    #[test]
    fn bad_config_json_is_an_error() {
        assert!(matches!(
            PoolTable::from_json(SCENE, Some("not json")),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn left_click_strikes_the_aimed_ball() {
        let mut table = table();
        let mut input = InputQueue::new();
        input.push(press(buttons::LEFT));
        table.update(DT, &mut input);

        let cue = table.world().find_ball("cueBall").unwrap();
        assert!(cue.velocity.z < 0.0);
        assert_eq!(cue.velocity.y, 0.0);
        assert!(table
            .contacts()
            .iter()
            .any(|c| c.kind == ContactKind::CueStrike && c.ball == cue.id));
        assert!(input.is_empty());
    }

    #[test]
    fn contacts_are_cleared_each_frame() {
        let mut table = table();
        let mut input = InputQueue::new();
        input.push(press(buttons::LEFT));
        table.update(DT, &mut input);
        assert!(!table.contacts().is_empty());
        table.update(DT, &mut input);
        assert!(table.contacts().iter().all(|c| c.kind != ContactKind::CueStrike));
    }

    #[test]
    fn right_drag_turns_camera() {
        let mut table = table();
        let mut input = InputQueue::new();
        let before = table.camera().horizontal_angle();
        input.push(press(buttons::RIGHT));
        input.push(InputEvent::PointerMove { x: 612.0, y: 384.0 });
        table.update(DT, &mut input);
        assert!(table.camera().horizontal_angle() < before);
        // right button never strikes
        assert!(!table.world().is_in_motion());
    }

    #[test]
    fn pointer_motion_without_button_is_ignored() {
        let mut table = table();
        let mut input = InputQueue::new();
        let before = table.camera().horizontal_angle();
        input.push(InputEvent::PointerMove { x: 100.0, y: 100.0 });
        input.push(InputEvent::PointerMove { x: 700.0, y: 300.0 });
        table.update(DT, &mut input);
        assert_eq!(table.camera().horizontal_angle(), before);
    }

    #[test]
    fn held_arrow_moves_camera_forward() {
        let mut table = table();
        let mut input = InputQueue::new();
        let start = table.camera().position;
        input.push(InputEvent::KeyDown { key_code: keys::ARROW_UP });
        table.update(0.1, &mut input);
        table.update(0.1, &mut input);

        let expected = start + table.camera().direction() * 50.0 * 0.2;
        assert!((table.camera().position - expected).length() < 1e-3);

        input.push(InputEvent::KeyUp { key_code: keys::ARROW_UP });
        table.update(0.1, &mut input);
        assert!((table.camera().position - expected).length() < 1e-3);
    }

    #[test]
    fn r_key_resets_camera_and_balls() {
        let mut table = table();
        let mut input = InputQueue::new();
        input.push(press(buttons::LEFT));
        input.push(InputEvent::KeyDown { key_code: keys::ARROW_LEFT });
        for _ in 0..5 {
            table.update(DT, &mut input);
        }
        assert!(table.world().is_in_motion());

        input.push(InputEvent::KeyUp { key_code: keys::ARROW_LEFT });
        input.push(InputEvent::KeyDown { key_code: keys::R });
        table.update(0.0, &mut input);

        assert!(!table.world().is_in_motion());
        let cue = table.world().find_ball("cueBall").unwrap();
        assert_eq!(cue.center, Vec3::ZERO);
        assert!((table.camera().position - Vec3::new(0.0, 40.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn custom_events_drive_strike_power() {
        let mut table = table();
        let mut input = InputQueue::new();
        input.push(InputEvent::Custom { kind: custom::SET_STRIKE_POWER, a: 3.0, b: 0.0, c: 0.0 });
        table.update(DT, &mut input);
        assert_eq!(table.strike_power(), 1.0);
    }

    #[test]
    fn custom_strike_matches_left_click() {
        let mut clicked = table();
        let mut input = InputQueue::new();
        input.push(press(buttons::LEFT));
        clicked.update(DT, &mut input);

        let mut commanded = table();
        input.push(InputEvent::Custom { kind: custom::STRIKE, a: 0.0, b: 0.0, c: 0.0 });
        commanded.update(DT, &mut input);

        let a = clicked.world().find_ball("cueBall").unwrap();
        let b = commanded.world().find_ball("cueBall").unwrap();
        assert_eq!(a.velocity, b.velocity);
        assert_eq!(commanded.contacts().len(), clicked.contacts().len());
    }

    #[test]
    fn resize_ignores_degenerate_sizes() {
        let mut table = table();
        table.resize(1920.0, 1080.0);
        table.resize(0.0, 500.0);
        assert!((table.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }
}
