/// Stable identifier for a ball or table box.
/// Balls and boxes share one id space, so a ball's cooldown map can hold both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// What a contact event was between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Two balls exchanged momentum along their contact normal.
    BallBall,
    /// A ball reflected off a table edge box.
    BallBox,
    /// A ball received a cue impulse.
    CueStrike,
}

/// A contact resolved during the current frame.
/// `other` is `None` for cue strikes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub kind: ContactKind,
    pub ball: EntityId,
    pub other: Option<EntityId>,
    /// Ball speed right after the contact was resolved.
    pub speed: f32,
}

impl ContactEvent {
    /// Floats per event when packed for the host: kind, ball, other (-1 if none), speed.
    pub const FLOATS: usize = 4;

    pub fn to_floats(&self) -> [f32; Self::FLOATS] {
        let kind = match self.kind {
            ContactKind::BallBall => 1.0,
            ContactKind::BallBox => 2.0,
            ContactKind::CueStrike => 3.0,
        };
        let other = self.other.map(|id| id.0 as f32).unwrap_or(-1.0);
        [kind, self.ball.0 as f32, other, self.speed]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_strike_packs_missing_other_as_negative() {
        let event = ContactEvent {
            kind: ContactKind::CueStrike,
            ball: EntityId(4),
            other: None,
            speed: 12.0,
        };
        assert_eq!(event.to_floats(), [3.0, 4.0, -1.0, 12.0]);
    }
}
