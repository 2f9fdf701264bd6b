use crate::agent::{CHASE_SPEED, DRIFT_SPEED, Team};
use crate::ball::{BallOutcome, PASS_SPEED, SHOOT_SPEED};
use crate::context::MatchContext;
use crate::events::{EventCollection, EventDispatcher, MatchEvent};
use crate::field::{FIELD_HEIGHT, FIELD_WIDTH, MatchField};
use crate::input::InputState;
use crate::state::{
    KICKOFF_RELEASE_VELOCITY, LEFT_KICKOFF_TIMEOUT_MS, MatchPhase, RIGHT_KICKOFF_DELAY_MS,
};
use itertools::Itertools;
use log::{debug, info};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

/// A Right-team holder is forced to shoot after holding this long.
pub const POSSESSION_LIMIT_MS: u64 = 2000;

/// The whole simulation: field, match context and the camera anchor the
/// frontend renders around. Advanced one fixed step at a time by `tick`.
pub struct MatchEngine {
    pub field: MatchField,
    pub context: MatchContext,
    pub camera: Vector2<f32>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEngine {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Fully deterministic engine for replays and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        MatchEngine {
            field: MatchField::new(),
            context: MatchContext::new(rng),
            camera: Vector2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
        }
    }

    /// Advances the match by `delta_ms` of game time under the given input
    /// snapshot.
    pub fn tick(&mut self, input: &InputState, delta_ms: u64) {
        let now = self.context.time.increment(delta_ms);

        if self.context.phase == MatchPhase::Kickoff {
            self.run_kickoff(input, now);
        }

        // A ball already past the boundary settles the tick on its own;
        // the camera keeps its last in-play anchor.
        if let Some(outcome) = self.field.ball.check_out(&self.field.agents) {
            let mut events = EventCollection::new();

            events.add(match outcome {
                BallOutcome::Goal { scoring } => MatchEvent::Goal(scoring),
                BallOutcome::Save { keeper } => MatchEvent::Save(keeper),
                BallOutcome::OutOfBounds => MatchEvent::OutOfBounds,
            });

            EventDispatcher::dispatch(events.to_vec(), &mut self.field, &mut self.context);
            return;
        }

        if self.context.phase == MatchPhase::Play {
            let mut events = EventCollection::new();

            self.resolve_input(input, now);
            self.move_agents();

            let holder_position = self.field.holder().map(|a| a.position);
            self.field.ball.update(holder_position);

            self.force_overdue_shot(now);
            self.resolve_possession(now, &mut events);

            if !events.is_empty() {
                EventDispatcher::dispatch(events.to_vec(), &mut self.field, &mut self.context);
            }
        }

        self.camera = self.field.ball.position;
    }

    /// Kickoff handling. The restarting side receives the ball once; the
    /// Right team auto-releases after its delay, the Left team waits for an
    /// action key (with a timeout fallback). A transition to `Play` takes
    /// effect within the same tick, so the key that started play also
    /// performs the release.
    fn run_kickoff(&mut self, input: &InputState, now: u64) {
        if !self.context.kickoff.initialized {
            self.grant_kickoff_ball();
            self.context.kickoff.initialized = true;
        }

        match self.context.kickoff.team {
            Team::Right => {
                if self.context.kickoff.elapsed(now) > RIGHT_KICKOFF_DELAY_MS {
                    let kicker = self.field.holder().map(|a| a.id);

                    for agent in &mut self.field.agents {
                        agent.has_ball = false;
                    }

                    let (vx, vy) = KICKOFF_RELEASE_VELOCITY;
                    self.field.ball.velocity = Vector2::new(vx, vy);
                    self.field.ball.last_possessor = kicker;
                    self.field.ball.released_at = now;
                    self.context.phase = MatchPhase::Play;

                    info!("right team releases the kickoff ball");
                }
            }
            Team::Left => {
                if input.any_action()
                    || self.context.kickoff.elapsed(now) > LEFT_KICKOFF_TIMEOUT_MS
                {
                    self.context.phase = MatchPhase::Play;
                }
            }
        }
    }

    /// Hands the kickoff ball to the restarting side: the controlled agent
    /// for the Left team, a random agent for the Right.
    fn grant_kickoff_ball(&mut self) {
        let id = match self.context.kickoff.team {
            Team::Left => self
                .field
                .controlled_index()
                .and_then(|index| self.field.agents.get(index))
                .or_else(|| self.field.agents.iter().find(|a| a.team == Team::Left))
                .map(|a| a.id),
            Team::Right => {
                let candidates: Vec<u32> = self
                    .field
                    .agents
                    .iter()
                    .filter(|a| a.team == Team::Right)
                    .map(|a| a.id)
                    .collect();

                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates[self.context.rng.random_range(0..candidates.len())])
                }
            }
        };

        if let Some(id) = id {
            debug!("kickoff ball granted to agent {}", id);
            self.field.grant_possession(id);
        }
    }

    /// Applies the input snapshot to the controlled agent: free axis
    /// movement plus, when it holds the ball, one exclusive release action
    /// in priority order pass, shoot, lob, through.
    fn resolve_input(&mut self, input: &InputState, now: u64) {
        let Some(index) = self.field.controlled_index() else {
            return;
        };

        let agent = &mut self.field.agents[index];

        if input.up {
            agent.position.y -= agent.speed;
        }
        if input.down {
            agent.position.y += agent.speed;
        }
        if input.left {
            agent.position.x -= agent.speed;
        }
        if input.right {
            agent.position.x += agent.speed;
        }

        if !agent.has_ball || !input.any_action() {
            return;
        }

        let direction = input.direction(agent.team.forward());

        let velocity = if input.pass {
            direction * PASS_SPEED
        } else if input.shoot {
            direction * SHOOT_SPEED
        } else if input.lob {
            direction * SHOOT_SPEED * 0.8
        } else {
            // Through ball stays on the ground and travels horizontally.
            Vector2::new(direction.x * PASS_SPEED, 0.0)
        };

        agent.has_ball = false;
        let id = agent.id;

        debug!("agent {} releases the ball at {:?}", id, velocity);
        self.field.ball.release(id, velocity, now);
    }

    /// AI movement for everyone except the controlled agent: a holder
    /// dribbles at goal, the nearest Right agent chases a free ball, and
    /// everyone else drifts back to their anchor.
    fn move_agents(&mut self) {
        let ball_position = self.field.ball.position;
        let chaser = self.right_chaser();

        for index in 0..self.field.agents.len() {
            let agent = &mut self.field.agents[index];

            if agent.controlled {
                continue;
            }

            if agent.has_ball {
                let target = agent.attack_target();
                agent.step_towards(target, CHASE_SPEED);
            } else if agent.team == Team::Left || chaser != Some(index) {
                let anchor = agent.anchor;
                agent.step_towards(anchor, DRIFT_SPEED);
            } else {
                agent.step_towards(ball_position, CHASE_SPEED);
            }

            agent.clamp_to_field();
        }
    }

    /// Index of the Right agent nearest the ball, ties broken by roster
    /// order. The holder never chases its own ball.
    fn right_chaser(&self) -> Option<usize> {
        let ball_position = self.field.ball.position;

        let index = self
            .field
            .agents
            .iter()
            .map(|a| {
                if a.team == Team::Right && !a.controlled && !a.has_ball {
                    a.distance_to(ball_position)
                } else {
                    f32::INFINITY
                }
            })
            .position_min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))?;

        let agent = &self.field.agents[index];
        if agent.team == Team::Right && !agent.controlled && !agent.has_ball {
            Some(index)
        } else {
            None
        }
    }

    /// A Right-team holder that has kept the ball past the possession limit
    /// shoots at the Left goal.
    fn force_overdue_shot(&mut self, now: u64) {
        if now.saturating_sub(self.field.ball.released_at) <= POSSESSION_LIMIT_MS {
            return;
        }

        let Some(index) = self
            .field
            .agents
            .iter()
            .position(|a| a.has_ball && a.team == Team::Right)
        else {
            return;
        };

        let agent = &mut self.field.agents[index];
        agent.has_ball = false;
        let id = agent.id;

        info!("agent {} held too long, forcing a shot", id);
        self.field
            .ball
            .release(id, Vector2::new(-SHOOT_SPEED, 0.0), now);
    }

    /// Grants the ball to agents that overlap it, in roster order. Each
    /// grant snaps the ball onto the new holder, so a later agent in the
    /// roster that also overlaps can take it over within the same tick.
    fn resolve_possession(&mut self, now: u64, events: &mut EventCollection) {
        for index in 0..self.field.agents.len() {
            let agent = &self.field.agents[index];

            if agent.has_ball {
                continue;
            }

            if self.field.ball.claimable_by(agent, now) {
                let id = agent.id;

                self.field.grant_possession(id);
                self.field.ball.last_possessor = Some(id);

                events.add(MatchEvent::Claimed(id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::REPOSSESS_COOLDOWN_MS;

    const STEP_MS: u64 = 16;

    fn idle() -> InputState {
        InputState::default()
    }

    #[test]
    fn seeded_engines_stay_in_lockstep() {
        let mut a = MatchEngine::with_seed(7);
        let mut b = MatchEngine::with_seed(7);

        let input = InputState {
            right: true,
            pass: true,
            ..InputState::default()
        };

        for _ in 0..600 {
            a.tick(&input, STEP_MS);
            b.tick(&input, STEP_MS);
        }

        assert_eq!(a.field.ball.position, b.field.ball.position);
        assert_eq!(a.context.score, b.context.score);
        assert_eq!(a.context.phase, b.context.phase);

        for (left, right) in a.field.agents.iter().zip(b.field.agents.iter()) {
            assert_eq!(left.position, right.position);
        }
    }

    #[test]
    fn right_kickoff_auto_releases_after_the_delay() {
        let mut engine = MatchEngine::with_seed(1);
        engine.context.kickoff.team = Team::Right;

        engine.tick(&idle(), 100);
        assert_eq!(engine.context.phase, MatchPhase::Kickoff);
        assert!(engine.field.holder().is_some());

        engine.tick(&idle(), RIGHT_KICKOFF_DELAY_MS);

        assert_eq!(engine.context.phase, MatchPhase::Play);
        assert!(engine.field.holder().is_none());
        assert!(engine.field.ball.last_possessor.is_some());

        // Friction has already applied once by the end of the tick.
        let (vx, vy) = KICKOFF_RELEASE_VELOCITY;
        assert!((engine.field.ball.velocity.x - vx * 0.98).abs() < 1e-6);
        assert!((engine.field.ball.velocity.y - vy * 0.98).abs() < 1e-6);
    }

    #[test]
    fn left_kickoff_action_key_starts_play_and_releases_in_one_tick() {
        let mut engine = MatchEngine::with_seed(2);
        engine.context.kickoff.team = Team::Left;

        let input = InputState {
            pass: true,
            ..InputState::default()
        };

        engine.tick(&input, STEP_MS);

        assert_eq!(engine.context.phase, MatchPhase::Play);
        assert!(engine.field.holder().is_none());

        let controlled = engine.field.controlled_index().map(|i| engine.field.agents[i].id);
        assert_eq!(engine.field.ball.last_possessor, controlled);

        // Default facing is the attacking direction, one friction step in.
        assert!((engine.field.ball.velocity.x - PASS_SPEED * 0.98).abs() < 1e-6);
        assert_eq!(engine.field.ball.velocity.y, 0.0);
    }

    #[test]
    fn left_kickoff_times_out_into_open_play() {
        let mut engine = MatchEngine::with_seed(2);
        engine.context.kickoff.team = Team::Left;

        engine.tick(&idle(), LEFT_KICKOFF_TIMEOUT_MS + 1);

        assert_eq!(engine.context.phase, MatchPhase::Play);
        // Nobody released, so the restarting agent keeps the ball.
        assert!(engine.field.holder().is_some());
    }

    #[test]
    fn releaser_reclaims_only_after_the_cooldown() {
        let mut engine = MatchEngine::with_seed(3);
        engine.context.phase = MatchPhase::Play;

        let index = engine.field.controlled_index().expect("controlled agent");
        let id = engine.field.agents[index].id;
        let spot = Vector2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);
        engine.field.agents[index].position = spot;
        engine.field.ball.position = spot;
        engine.field.ball.release(id, Vector2::zeros(), 0);

        for _ in 0..4 {
            engine.tick(&idle(), 100);
            assert!(engine.field.holder().is_none());
        }

        engine.tick(&idle(), 100);

        assert_eq!(engine.context.time.time, REPOSSESS_COOLDOWN_MS);
        assert_eq!(engine.field.holder().map(|a| a.id), Some(id));
    }

    #[test]
    fn overdue_right_holder_is_forced_to_shoot() {
        let mut engine = MatchEngine::with_seed(4);
        engine.context.phase = MatchPhase::Play;
        engine.field.grant_possession(12);

        engine.tick(&idle(), POSSESSION_LIMIT_MS + 1);

        assert!(engine.field.holder().is_none());
        assert_eq!(engine.field.ball.last_possessor, Some(12));
        assert_eq!(engine.field.ball.velocity, Vector2::new(-SHOOT_SPEED, 0.0));
    }

    #[test]
    fn possession_limit_runs_from_the_release_not_the_claim() {
        let mut engine = MatchEngine::with_seed(9);
        engine.context.phase = MatchPhase::Play;

        // Free ball resting on a Right agent, long after the last release.
        engine.field.ball.position = engine.field.agents[12].position;
        engine.field.ball.velocity = Vector2::zeros();

        engine.tick(&idle(), 3000);
        assert_eq!(engine.field.holder().map(|a| a.id), Some(12));

        // The claim does not restart the clock, so the holder is already
        // overdue on the next tick.
        engine.tick(&idle(), STEP_MS);

        assert!(engine.field.holder().is_none());
        assert_eq!(engine.field.ball.last_possessor, Some(12));
        assert_eq!(engine.field.ball.velocity, Vector2::new(-SHOOT_SPEED, 0.0));
    }

    #[test]
    fn goal_line_crossing_scores_and_restarts() {
        let mut engine = MatchEngine::with_seed(5);
        engine.context.phase = MatchPhase::Play;
        engine.field.agents[0].position = Vector2::new(60.0, 50.0);
        engine.field.ball.position = Vector2::new(-2.0, 50.0);
        engine.field.ball.velocity = Vector2::new(-SHOOT_SPEED, 0.0);

        engine.tick(&idle(), STEP_MS);

        assert_eq!(engine.context.score.right(), 1);
        assert_eq!(engine.context.score.left(), 0);
        assert_eq!(engine.context.phase, MatchPhase::Kickoff);
        assert_eq!(
            engine.field.ball.position,
            Vector2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0)
        );
    }

    #[test]
    fn keeper_save_keeps_the_score_and_resumes_play() {
        let mut engine = MatchEngine::with_seed(6);
        engine.context.phase = MatchPhase::Play;
        engine.field.ball.position = Vector2::new(-2.0, 50.0);
        engine.field.ball.velocity = Vector2::zeros();

        engine.tick(&idle(), STEP_MS);

        assert_eq!(engine.context.score.right(), 0);
        assert_eq!(engine.context.phase, MatchPhase::Play);
        assert_eq!(engine.field.holder().map(|a| a.id), Some(0));
    }

    #[test]
    fn long_sessions_keep_the_core_invariants() {
        let mut engine = MatchEngine::with_seed(8);

        for step in 0u64..3000 {
            let input = InputState {
                right: step % 3 != 0,
                up: step % 7 == 0,
                pass: step % 50 == 0,
                shoot: step % 173 == 0,
                ..InputState::default()
            };

            let (left_before, right_before) =
                (engine.context.score.left(), engine.context.score.right());

            engine.tick(&input, STEP_MS);

            let holders = engine.field.agents.iter().filter(|a| a.has_ball).count();
            assert!(holders <= 1);

            assert!(engine.context.score.left() >= left_before);
            assert!(engine.context.score.right() >= right_before);

            assert!(engine.field.ball.position.x.is_finite());
            assert!(engine.field.ball.position.y.is_finite());
            assert_ne!(engine.context.phase, MatchPhase::Out);
        }
    }
}
