use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::core::ray::Ray;

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEG: f32 = 60.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Optional lower and upper bound applied to an angle after every turn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AngleClamp {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl AngleClamp {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    pub fn apply(&self, angle: f32) -> f32 {
        let mut angle = angle;
        if let Some(min) = self.min {
            if angle < min {
                angle = min;
            }
        }
        if let Some(max) = self.max {
            if angle > max {
                angle = max;
            }
        }
        angle
    }
}

/// Free-flying perspective camera.
///
/// Orientation is stored as a horizontal angle (around world Y, zero looking
/// down +Z) and a vertical angle (pitch, positive looking up). The derived
/// basis vectors are recomputed on every turn.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: Vec3,
    horizontal_angle: f32,
    vertical_angle: f32,
    pub horizontal_clamp: AngleClamp,
    pub vertical_clamp: AngleClamp,
    direction: Vec3,
    right: Vec3,
    up: Vec3,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// World-space eye position; `w` is padding.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;

    /// The uniform as flat floats: view, projection, eye.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

impl Camera3D {
    pub fn new() -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            horizontal_angle: 0.0,
            vertical_angle: 0.0,
            horizontal_clamp: AngleClamp::default(),
            vertical_clamp: AngleClamp::default(),
            direction: Vec3::Z,
            right: Vec3::NEG_X,
            up: Vec3::Y,
        };
        camera.compute_vectors();
        camera
    }

    /// Camera placed above one end of the table, looking down at its center.
    pub fn table_view() -> Self {
        let mut camera = Self::new();
        camera.look_at_table();
        camera
    }

    /// Reset to the table pose, including the pitch limits.
    pub fn look_at_table(&mut self) {
        self.reset();
        self.vertical_clamp = AngleClamp::new(-PI / 2.5, PI / 3.0);
        self.move_by(40.0, 0.0, 40.0);
        self.turn(PI, -PI / 4.0);
    }

    /// Return to the origin looking down +Z. Clamps are kept.
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.horizontal_angle = 0.0;
        self.vertical_angle = 0.0;
        self.compute_vectors();
    }

    pub fn turn(&mut self, horizontal_delta: f32, vertical_delta: f32) {
        self.horizontal_angle = self
            .horizontal_clamp
            .apply(self.horizontal_angle + horizontal_delta);
        self.vertical_angle = self
            .vertical_clamp
            .apply(self.vertical_angle + vertical_delta);
        self.compute_vectors();
    }

    /// Move along the view direction, the horizontal right vector and world up.
    pub fn move_by(&mut self, forward: f32, right: f32, up: f32) {
        self.position += self.direction * forward;
        self.position += self.right * right;
        self.position += Vec3::Y * up;
    }

    fn compute_vectors(&mut self) {
        let (sin_v, cos_v) = self.vertical_angle.sin_cos();
        let (sin_h, cos_h) = self.horizontal_angle.sin_cos();
        self.direction = Vec3::new(cos_v * sin_h, sin_v, cos_v * cos_h);

        let (sin_r, cos_r) = (self.horizontal_angle - PI / 2.0).sin_cos();
        self.right = Vec3::new(sin_r, 0.0, cos_r);
        self.up = self.right.cross(self.direction);
    }

    pub fn horizontal_angle(&self) -> f32 {
        self.horizontal_angle
    }

    pub fn vertical_angle(&self) -> f32 {
        self.vertical_angle
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Ray from the eye along the view direction, used to aim the cue.
    pub fn ray(&self) -> Ray {
        Ray::new(self.position, self.direction)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, self.up)
    }

    /// Perspective projection for a viewport with the given width/height ratio.
    /// Degenerate ratios fall back to a square viewport.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(FIELD_OF_VIEW_DEG.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn uniform(&self, aspect: f32) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix(aspect).to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
        }
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new()
    }
}
