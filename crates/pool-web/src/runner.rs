use pool_engine::input::queue::custom;
use pool_engine::{
    CameraUniform, ContactEvent, FrameClock, InputEvent, InputQueue, PoolTable, SceneError,
};

/// Drives a [`PoolTable`] from host callbacks.
///
/// The browser side keeps a single `thread_local!` TableRunner and forwards
/// input and animation-frame callbacks through free `#[wasm_bindgen]`
/// functions.
pub struct TableRunner {
    table: PoolTable,
    input: InputQueue,
    clock: FrameClock,
    /// Flat contact events of the last frame, `ContactEvent::FLOATS` each.
    contact_buffer: Vec<f32>,
    /// Ball centers of the last frame, xyz per ball.
    center_buffer: Vec<f32>,
}

impl TableRunner {
    pub fn new(table: PoolTable) -> Self {
        let mut runner = Self {
            table,
            input: InputQueue::new(),
            clock: FrameClock::new(),
            contact_buffer: Vec::with_capacity(16 * ContactEvent::FLOATS),
            center_buffer: Vec::new(),
        };
        runner.pack_frame_data();
        runner
    }

    pub fn from_json(scene_json: &str, config_json: Option<&str>) -> Result<Self, SceneError> {
        Ok(Self::new(PoolTable::from_json(scene_json, config_json)?))
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at wall-clock time `now` (seconds).
    pub fn tick(&mut self, now: f64) {
        let dt = self.clock.advance(now);
        self.step(dt);
    }

    /// Run one frame with an explicit delta, bypassing the clock.
    pub fn step(&mut self, dt: f32) {
        self.table.update(dt, &mut self.input);
        self.pack_frame_data();
    }

    /// Queue a cue strike along the camera ray for the next frame, so its
    /// contact shows up in the packed buffers.
    pub fn strike(&mut self) {
        self.push_input(InputEvent::Custom { kind: custom::STRIKE, a: 0.0, b: 0.0, c: 0.0 });
    }

    /// Queue a camera and ball reset for the next frame.
    pub fn reset(&mut self) {
        self.push_input(InputEvent::Custom { kind: custom::RESET, a: 0.0, b: 0.0, c: 0.0 });
    }

    /// Forget the last timestamp so a paused tab does not produce one huge frame.
    pub fn pause(&mut self) {
        self.clock.restart();
    }

    fn pack_frame_data(&mut self) {
        self.contact_buffer.clear();
        for contact in self.table.contacts() {
            self.contact_buffer.extend_from_slice(&contact.to_floats());
        }

        self.center_buffer.clear();
        for center in self.table.world().centers() {
            self.center_buffer.extend_from_slice(&center.to_array());
        }
    }

    pub fn table(&self) -> &PoolTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut PoolTable {
        &mut self.table
    }

    pub fn last_dt(&self) -> f32 {
        self.clock.dt()
    }

    // ---- Pointer accessors for host-side reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.table.instances().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.table.instances().instance_count()
    }

    pub fn contacts(&self) -> &[f32] {
        &self.contact_buffer
    }

    pub fn contact_count(&self) -> u32 {
        (self.contact_buffer.len() / ContactEvent::FLOATS) as u32
    }

    pub fn centers(&self) -> &[f32] {
        &self.center_buffer
    }

    /// Camera uniform for the current viewport aspect.
    pub fn camera_uniform(&self) -> CameraUniform {
        self.table.camera().uniform(self.table.aspect())
    }
}
