use serde::{Deserialize, Serialize};

/// Tunable physics and interaction parameters.
///
/// Every field has a reference default; a JSON object may override any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Linear velocity decay per second while a ball is moving (default: 1.8).
    pub friction_coefficient: f32,
    /// Mass of every ball in kg (default: 0.5).
    pub ball_mass: f32,
    /// Cue spring constant in kg·m/s² (default: 10).
    pub spring_constant: f32,
    /// Duration of cue/ball contact in seconds (default: 0.01).
    pub cue_contact_time: f32,
    /// Time before a ball may collide with the same object again (default: 0.1).
    pub hit_cooldown: f32,
    /// User strike power in `[0, 1]` (default: 0.5).
    pub strike_power: f32,
    /// Scale from scene units to meters for the cue push distance (default: 1200).
    pub units_to_meters: f32,
    /// Cue push distance in scene units before scaling (default: 1.0).
    pub cue_push_distance: f32,
    /// Camera translation speed in units per second (default: 50).
    pub camera_move_speed: f32,
    /// Camera rotation speed per unit of normalized pointer motion (default: 15).
    pub camera_turn_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction_coefficient: 1.8,
            ball_mass: 0.5,
            spring_constant: 10.0,
            cue_contact_time: 0.01,
            hit_cooldown: 0.1,
            strike_power: 0.5,
            units_to_meters: 1200.0,
            cue_push_distance: 1.0,
            camera_move_speed: 50.0,
            camera_turn_speed: 15.0,
        }
    }
}

impl PhysicsConfig {
    /// Parse a (possibly partial) config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.set_strike_power(config.strike_power);
        Ok(config)
    }

    /// Set the strike power, clamped to `[0, 1]`.
    pub fn set_strike_power(&mut self, power: f32) {
        self.strike_power = clamp_power(power);
    }

    /// Distance the cue spring is compressed for a strike at the current power.
    /// Uses the clamped power even when the field was set directly.
    pub fn cue_spring_distance(&self) -> f32 {
        self.cue_push_distance * self.units_to_meters * clamp_power(self.strike_power)
    }
}

fn clamp_power(power: f32) -> f32 {
    if power.is_nan() {
        0.0
    } else {
        power.clamp(0.0, 1.0)
    }
}
