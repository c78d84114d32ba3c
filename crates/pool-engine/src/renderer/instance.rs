use bytemuck::{Pod, Zeroable};

use crate::components::ball::Ball;

/// Per-ball render data read by the host renderer.
/// 20 floats = 80 bytes stride: column-major model matrix, then center and radius.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct BallInstance {
    /// Accumulated model transform (translation only), column-major.
    pub transform: [[f32; 4]; 4],
    /// World-space center.
    pub center: [f32; 3],
    pub radius: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_ball(ball: &Ball) -> Self {
        Self {
            transform: ball.transform().to_cols_array_2d(),
            center: ball.center.to_array(),
            radius: ball.radius(),
        }
    }
}

/// Ball instances for the current frame, in world order.
pub struct InstanceBuffer {
    pub instances: Vec<BallInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(16),
        }
    }

    /// Replace the buffer contents with one instance per ball.
    pub fn rebuild(&mut self, balls: &[Ball]) {
        self.instances.clear();
        self.instances.extend(balls.iter().map(BallInstance::from_ball));
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
