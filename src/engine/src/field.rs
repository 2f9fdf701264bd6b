use crate::agent::{Agent, Team};
use crate::ball::Ball;
use nalgebra::Vector2;

/// Field size in world units.
pub const FIELD_WIDTH: f32 = 150.0;
pub const FIELD_HEIGHT: f32 = 100.0;

/// Vertical extent of each goal mouth: a ball crossing a goal line inside
/// this band is a shot on goal rather than a plain exit.
pub const GOAL_BAND_MIN: f32 = 30.0;
pub const GOAL_BAND_MAX: f32 = 70.0;

/// How far outside the nominal bounds the ball may travel before it counts
/// as out.
pub const OUT_TOLERANCE: f32 = 1.0;

/// Depth of the goal nets behind the goal lines, used by the renderer.
pub const GOAL_DEPTH: f32 = 5.0;

/// One team's formation template in Left-team coordinates, mirrored for the
/// Right team: goalkeeper, four defenders, four midfielders, two forwards.
const FORMATION: [(f32, f32, bool); 11] = [
    (5.0, 50.0, true),
    (20.0, 20.0, false),
    (20.0, 40.0, false),
    (20.0, 60.0, false),
    (20.0, 80.0, false),
    (40.0, 20.0, false),
    (40.0, 40.0, false),
    (40.0, 60.0, false),
    (40.0, 80.0, false),
    (60.0, 35.0, false),
    (60.0, 65.0, false),
];

/// Template slot of the Left-team agent the user controls (first forward).
const CONTROLLED_SLOT: usize = 9;

/// The pitch contents: the ball and the fixed roster of 22 agents, Left
/// team first.
pub struct MatchField {
    pub ball: Ball,
    pub agents: Vec<Agent>,
}

impl Default for MatchField {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchField {
    pub fn new() -> Self {
        let mut agents = Vec::with_capacity(FORMATION.len() * 2);
        let mut next_id = 0u32;

        for (slot, &(x, y, is_goalkeeper)) in FORMATION.iter().enumerate() {
            agents.push(Agent::new(
                next_id,
                Team::Left,
                Vector2::new(x, y),
                is_goalkeeper,
                slot == CONTROLLED_SLOT,
            ));
            next_id += 1;
        }

        for &(x, y, is_goalkeeper) in FORMATION.iter() {
            agents.push(Agent::new(
                next_id,
                Team::Right,
                Vector2::new(FIELD_WIDTH - x, y),
                is_goalkeeper,
                false,
            ));
            next_id += 1;
        }

        MatchField {
            ball: Ball::at_centre(),
            agents,
        }
    }

    /// Everyone back to formation, ball to the centre spot with zero
    /// velocity, all possession flags cleared.
    pub fn reset_positions(&mut self) {
        for agent in &mut self.agents {
            agent.position = agent.anchor;
            agent.has_ball = false;
        }

        self.ball.position = Vector2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);
        self.ball.velocity = Vector2::zeros();
    }

    pub fn holder(&self) -> Option<&Agent> {
        self.agents.iter().find(|a| a.has_ball)
    }

    pub fn controlled_index(&self) -> Option<usize> {
        self.agents.iter().position(|a| a.controlled)
    }

    /// Clears every possession flag, then grants the ball to `id` and snaps
    /// the ball to that agent. Keeps the at-most-one-holder invariant by
    /// construction.
    pub fn grant_possession(&mut self, id: u32) {
        for agent in &mut self.agents {
            agent.has_ball = agent.id == id;
        }

        if let Some(agent) = self.agents.iter().find(|a| a.id == id) {
            self.ball.position = agent.position;
            self.ball.velocity = Vector2::zeros();
        }
    }
}
