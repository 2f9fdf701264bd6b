use crate::agent::{Agent, Team};
use crate::field::{FIELD_HEIGHT, FIELD_WIDTH, GOAL_BAND_MAX, GOAL_BAND_MIN, OUT_TOLERANCE};
use nalgebra::Vector2;

/// Ball speed of a standard pass.
pub const PASS_SPEED: f32 = 1.0;
/// Ball speed of a full shot.
pub const SHOOT_SPEED: f32 = 2.0;

/// Multiplicative velocity decay applied every tick to a free ball.
pub const BALL_FRICTION: f32 = 0.98;
/// Velocity components below this snap to exactly zero.
pub const VELOCITY_EPSILON: f32 = 0.01;

/// A ball moving faster than this cannot be absorbed by a collision.
pub const CLAIM_SPEED_LIMIT: f32 = 0.5;
/// Window after a release during which the releasing agent cannot reclaim.
pub const REPOSSESS_COOLDOWN_MS: u64 = 500;

pub const BALL_RADIUS: f32 = 4.0;

/// Distance within which a goalkeeper can intercept a goal-bound ball.
pub const GK_SAVE_DISTANCE: f32 = 10.0;
/// A goal-bound ball at or above this speed beats the goalkeeper.
pub const GK_SAVE_SPEED_LIMIT: f32 = 2.0;

/// The single shared ball.
#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
    /// Id of the last agent that held possession, if any.
    pub last_possessor: Option<u32>,
    /// Match-time stamp of the last release. Gates repossession and also
    /// drives the Right-team possession-limit clock.
    pub released_at: u64,
}

/// Verdict of the boundary check for a ball that has left the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallOutcome {
    Goal { scoring: Team },
    Save { keeper: u32 },
    OutOfBounds,
}

impl Ball {
    pub fn at_centre() -> Self {
        Ball {
            position: Vector2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            velocity: Vector2::zeros(),
            radius: BALL_RADIUS,
            last_possessor: None,
            released_at: 0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    /// Records a release and imparts the given velocity.
    pub fn release(&mut self, possessor: u32, velocity: Vector2<f32>, now: u64) {
        self.velocity = velocity;
        self.last_possessor = Some(possessor);
        self.released_at = now;
    }

    /// One tick of kinematics. A held ball is pinned to its holder; a free
    /// ball integrates velocity, decays by friction and snaps tiny
    /// component velocities to zero.
    pub fn update(&mut self, holder_position: Option<Vector2<f32>>) {
        if let Some(position) = holder_position {
            self.position = position;
            return;
        }

        self.position += self.velocity;
        self.velocity *= BALL_FRICTION;

        if self.velocity.x.abs() < VELOCITY_EPSILON {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < VELOCITY_EPSILON {
            self.velocity.y = 0.0;
        }
    }

    /// Whether `agent` may take possession right now: overlapping the ball,
    /// ball slow enough to absorb, and not inside the releasing agent's
    /// repossession cooldown.
    pub fn claimable_by(&self, agent: &Agent, now: u64) -> bool {
        if agent.distance_to(self.position) >= agent.radius + self.radius {
            return false;
        }

        if self.speed() > CLAIM_SPEED_LIMIT {
            return false;
        }

        if self.last_possessor == Some(agent.id)
            && now.saturating_sub(self.released_at) < REPOSSESS_COOLDOWN_MS
        {
            return false;
        }

        true
    }

    /// Boundary and goal-line detection with a one-unit tolerance outside
    /// the nominal field bounds. Returns the outcome once the ball has left
    /// the field, `None` while it is still in play.
    pub fn check_out(&self, agents: &[Agent]) -> Option<BallOutcome> {
        let outside = self.position.x < -OUT_TOLERANCE
            || self.position.x > FIELD_WIDTH + OUT_TOLERANCE
            || self.position.y < -OUT_TOLERANCE
            || self.position.y > FIELD_HEIGHT + OUT_TOLERANCE;

        if !outside {
            return None;
        }

        let in_goal_band =
            self.position.y >= GOAL_BAND_MIN && self.position.y <= GOAL_BAND_MAX;

        if self.position.x < -OUT_TOLERANCE && in_goal_band {
            return Some(self.resolve_goal_mouth(agents, Team::Left));
        }

        if self.position.x > FIELD_WIDTH + OUT_TOLERANCE && in_goal_band {
            return Some(self.resolve_goal_mouth(agents, Team::Right));
        }

        Some(BallOutcome::OutOfBounds)
    }

    /// A ball inside the `defending` side's goal mouth: a save when the
    /// goalkeeper is close enough and the ball slow enough, otherwise a
    /// goal for the other side. A missing goalkeeper means no save is
    /// possible.
    fn resolve_goal_mouth(&self, agents: &[Agent], defending: Team) -> BallOutcome {
        if let Some(keeper) = agents
            .iter()
            .find(|a| a.team == defending && a.is_goalkeeper)
        {
            if keeper.distance_to(self.position) < GK_SAVE_DISTANCE
                && self.speed() < GK_SAVE_SPEED_LIMIT
            {
                return BallOutcome::Save { keeper: keeper.id };
            }
        }

        BallOutcome::Goal {
            scoring: defending.opponent(),
        }
    }
}
