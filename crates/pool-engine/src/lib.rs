pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::PhysicsConfig;
pub use api::table::PoolTable;
pub use api::types::{ContactEvent, ContactKind, EntityId};
pub use assets::manifest::{EntityDescriptor, EntityRole, SceneError, SceneManifest};
pub use components::ball::Ball;
pub use components::table_box::TableBox;
pub use crate::core::numeric::{is_eq, is_neg, is_pos, is_zero, EPSILON};
pub use crate::core::physics::PhysicsWorld;
pub use crate::core::ray::Ray;
pub use crate::core::roots::{quadratic_roots, Roots};
pub use crate::core::time::FrameClock;
pub use crate::core::timer::CountdownTimer;
pub use input::queue::{ButtonStates, InputEvent, InputQueue};
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::instance::{BallInstance, InstanceBuffer};
