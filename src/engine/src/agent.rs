use crate::field::{FIELD_HEIGHT, FIELD_WIDTH};
use nalgebra::Vector2;

/// Movement speed of the controlled agent, per axis per tick.
pub const PLAYER_SPEED: f32 = 0.4;
/// Per-tick speed of an AI holder advancing on goal or a chaser pursuing
/// the ball.
pub const CHASE_SPEED: f32 = 0.5;
/// Per-tick speed of an agent drifting back to its formation anchor.
pub const DRIFT_SPEED: f32 = 0.3;

pub const GOALKEEPER_RADIUS: f32 = 12.0;
pub const OUTFIELD_RADIUS: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Left,
    Right,
}

impl Team {
    pub fn opponent(&self) -> Team {
        match self {
            Team::Left => Team::Right,
            Team::Right => Team::Left,
        }
    }

    /// Default facing used for a release when no arrow is held.
    pub fn forward(&self) -> Vector2<f32> {
        match self {
            Team::Left => Vector2::new(1.0, 0.0),
            Team::Right => Vector2::new(-1.0, 0.0),
        }
    }
}

/// One on-field participant. All 22 are created at setup and live for the
/// whole session; only the kinematic fields and the possession flag mutate.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: u32,
    pub team: Team,
    pub position: Vector2<f32>,
    /// Formation anchor, constant after creation.
    pub anchor: Vector2<f32>,
    pub radius: f32,
    pub speed: f32,
    pub is_goalkeeper: bool,
    /// True for exactly one Left-team outfield agent; its movement comes
    /// from input instead of the AI rules.
    pub controlled: bool,
    pub has_ball: bool,
}

impl Agent {
    pub fn new(id: u32, team: Team, anchor: Vector2<f32>, is_goalkeeper: bool, controlled: bool) -> Self {
        Agent {
            id,
            team,
            position: anchor,
            anchor,
            radius: if is_goalkeeper {
                GOALKEEPER_RADIUS
            } else {
                OUTFIELD_RADIUS
            },
            speed: PLAYER_SPEED,
            is_goalkeeper,
            controlled,
            has_ball: false,
        }
    }

    /// Where a holder on this team dribbles toward: just short of the
    /// opposing goal line, staying on its own formation lane.
    pub fn attack_target(&self) -> Vector2<f32> {
        match self.team {
            Team::Left => Vector2::new(FIELD_WIDTH - 10.0, self.anchor.y),
            Team::Right => Vector2::new(10.0, self.anchor.y),
        }
    }

    /// Advances `step` units toward `target`, holding position inside a
    /// one-unit deadband so agents settle instead of oscillating.
    pub fn step_towards(&mut self, target: Vector2<f32>, step: f32) {
        let delta = target - self.position;
        let distance = delta.norm();

        if distance > 1.0 {
            self.position += delta / distance * step;
        }
    }

    pub fn clamp_to_field(&mut self) {
        self.position.x = self.position.x.clamp(0.0, FIELD_WIDTH);
        self.position.y = self.position.y.clamp(0.0, FIELD_HEIGHT);
    }

    pub fn distance_to(&self, point: Vector2<f32>) -> f32 {
        (self.position - point).norm()
    }
}
