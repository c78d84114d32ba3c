use glam::Vec3;
use crate::api::types::EntityId;

/// A static axis-aligned table segment (cushion edge or playing surface).
///
/// `extents` are full widths along each axis. Containment is a horizontal
/// (x/z) footprint test; the vertical axis is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBox {
    pub id: EntityId,
    pub name: String,
    pub center: Vec3,
    pub extents: Vec3,
}

impl TableBox {
    pub fn new(id: EntityId, name: impl Into<String>, center: Vec3, extents: Vec3) -> Self {
        Self {
            id,
            name: name.into(),
            center,
            extents,
        }
    }

    pub fn left_x(&self) -> f32 {
        self.center.x - self.extents.x / 2.0
    }

    pub fn right_x(&self) -> f32 {
        self.center.x + self.extents.x / 2.0
    }

    pub fn front_z(&self) -> f32 {
        self.center.z + self.extents.z / 2.0
    }

    pub fn back_z(&self) -> f32 {
        self.center.z - self.extents.z / 2.0
    }

    /// Whether `point` lies inside the box footprint, bounds inclusive.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.left_x()
            && point.x <= self.right_x()
            && point.z <= self.front_z()
            && point.z >= self.back_z()
    }
}
