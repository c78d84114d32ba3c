use std::collections::HashSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::config::PhysicsConfig;
use crate::api::types::EntityId;
use crate::components::ball::Ball;
use crate::components::table_box::TableBox;
use crate::core::physics::PhysicsWorld;

/// Name of the record describing the playing surface.
pub const SURFACE_NAME: &str = "poolsurface";
/// Suffix marking a cushion edge record.
pub const EDGE_SUFFIX: &str = "FeltEdge";
/// Suffix marking a ball record.
pub const BALL_SUFFIX: &str = "Ball";
/// Radius used for ball records that do not specify one.
pub const DEFAULT_BALL_RADIUS: f32 = 1.0;

/// Errors raised while turning a scene description into a world.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("malformed scene description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ball `{name}` has invalid radius {radius}")]
    InvalidRadius { name: String, radius: f32 },
    #[error("box `{name}` has negative or non-finite extents {extents:?}")]
    InvalidExtents { name: String, extents: [f32; 3] },
    #[error("entity name `{0}` appears more than once")]
    DuplicateName(String),
}

/// Flat scene description: one record per named table object.
/// Loaded from a JSON file exported by the scene authoring tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneManifest {
    pub entities: Vec<EntityDescriptor>,
}

/// A named object with its world-space center and size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    pub center: [f32; 3],
    /// Ball radius (balls only).
    #[serde(default)]
    pub radius: Option<f32>,
    /// Full box widths (boxes only).
    #[serde(default)]
    pub extents: Option<[f32; 3]>,
}

/// What a record becomes in the simulation, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRole {
    Ball,
    Edge,
    Surface,
    Ignored,
}

impl EntityRole {
    pub fn classify(name: &str) -> Self {
        if name == SURFACE_NAME {
            EntityRole::Surface
        } else if name.ends_with(EDGE_SUFFIX) {
            EntityRole::Edge
        } else if name.ends_with(BALL_SUFFIX) {
            EntityRole::Ball
        } else {
            EntityRole::Ignored
        }
    }
}

impl SceneManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a physics world from the manifest.
    ///
    /// Ids are assigned sequentially in record order, starting at 1, so balls
    /// and edges keep their authoring order. Unrecognised names are skipped.
    pub fn build_world(&self, config: PhysicsConfig) -> Result<PhysicsWorld, SceneError> {
        let mut world = PhysicsWorld::new(config);
        let mut seen = HashSet::with_capacity(self.entities.len());
        let mut next_id = 1;

        for desc in &self.entities {
            if !seen.insert(desc.name.as_str()) {
                return Err(SceneError::DuplicateName(desc.name.clone()));
            }

            let role = EntityRole::classify(&desc.name);
            let id = EntityId(next_id);
            let center = Vec3::from_array(desc.center);

            match role {
                EntityRole::Ignored => {
                    log::warn!("scene: ignoring unrecognised entity `{}`", desc.name);
                    continue;
                }
                EntityRole::Ball => {
                    let radius = desc.radius.unwrap_or(DEFAULT_BALL_RADIUS);
                    if !radius.is_finite() || radius <= 0.0 {
                        return Err(SceneError::InvalidRadius {
                            name: desc.name.clone(),
                            radius,
                        });
                    }
                    world.add_ball(Ball::new(id, desc.name.clone(), center, radius));
                }
                EntityRole::Edge | EntityRole::Surface => {
                    let extents = desc.extents.unwrap_or([0.0; 3]);
                    if extents.iter().any(|e| !e.is_finite() || *e < 0.0) {
                        return Err(SceneError::InvalidExtents {
                            name: desc.name.clone(),
                            extents,
                        });
                    }
                    let table_box =
                        TableBox::new(id, desc.name.clone(), center, Vec3::from_array(extents));
                    if role == EntityRole::Surface {
                        world.set_surface(table_box);
                    } else {
                        world.add_edge(table_box);
                    }
                }
            }
            next_id += 1;
        }

        log::info!(
            "scene loaded: {} balls, {} edges",
            world.ball_count(),
            world.edge_count()
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "entities": [
            { "name": "poolsurface", "center": [0, 0, 0], "extents": [40, 1, 80] },
            { "name": "leftFeltEdge", "center": [-21, 1, 0], "extents": [2, 2, 80] },
            { "name": "rightFeltEdge", "center": [21, 1, 0], "extents": [2, 2, 80] },
            { "name": "cueBall", "center": [0, 1, -20] },
            { "name": "eightBall", "center": [0, 1, 20], "radius": 1.5 },
            { "name": "lamp", "center": [0, 30, 0] }
        ]
    }"#;

    #[test]
    fn classifies_by_name() {
        assert_eq!(EntityRole::classify("poolsurface"), EntityRole::Surface);
        assert_eq!(EntityRole::classify("backFeltEdge"), EntityRole::Edge);
        assert_eq!(EntityRole::classify("cueBall"), EntityRole::Ball);
        assert_eq!(EntityRole::classify("backWoodEdge"), EntityRole::Ignored);
        assert_eq!(EntityRole::classify("FeltEdge"), EntityRole::Edge);
    }

    #[test]
    fn builds_world_in_record_order() {
        let manifest = SceneManifest::from_json(TABLE).unwrap();
        let world = manifest.build_world(PhysicsConfig::default()).unwrap();

        assert_eq!(world.ball_count(), 2);
        assert_eq!(world.edge_count(), 2);
        assert!(world.surface().is_some());

        assert_eq!(world.balls()[0].name, "cueBall");
        assert_eq!(world.balls()[0].radius(), DEFAULT_BALL_RADIUS);
        assert_eq!(world.balls()[1].radius(), 1.5);
        assert_eq!(world.edges()[0].name, "leftFeltEdge");
    }

    #[test]
    fn ids_are_unique_across_balls_and_boxes() {
        let manifest = SceneManifest::from_json(TABLE).unwrap();
        let world = manifest.build_world(PhysicsConfig::default()).unwrap();

        let mut ids: Vec<EntityId> = world.balls().iter().map(|b| b.id).collect();
        ids.extend(world.edges().iter().map(|e| e.id));
        ids.extend(world.surface().map(|s| s.id));
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn rejects_duplicate_names() {
        let json = r#"{ "entities": [
            { "name": "oneBall", "center": [0, 0, 0] },
            { "name": "oneBall", "center": [5, 0, 0] }
        ] }"#;
        let err = SceneManifest::from_json(json)
            .unwrap()
            .build_world(PhysicsConfig::default())
            .unwrap_err();
        assert!(matches!(err, SceneError::DuplicateName(name) if name == "oneBall"));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let json = r#"{ "entities": [ { "name": "badBall", "center": [0, 0, 0], "radius": 0.0 } ] }"#;
        let err = SceneManifest::from_json(json)
            .unwrap()
            .build_world(PhysicsConfig::default())
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidRadius { .. }));
    }

    #[test]
    fn rejects_negative_extents() {
        let json = r#"{ "entities": [ { "name": "topFeltEdge", "center": [0, 0, 0], "extents": [1, -1, 1] } ] }"#;
        let err = SceneManifest::from_json(json)
            .unwrap()
            .build_world(PhysicsConfig::default())
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidExtents { .. }));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = SceneManifest::from_json("{ \"entities\": [").unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
        assert!(err.to_string().starts_with("malformed scene description"));
    }
}
