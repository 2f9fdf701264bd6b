use crate::agent::Team;
use crate::state::{KickoffState, MatchPhase};
use rand::Rng;
use rand::rngs::StdRng;

/// Mutable match-level state shared across a whole session: phase, score,
/// clock, kickoff bookkeeping and the session RNG.
pub struct MatchContext {
    pub phase: MatchPhase,
    pub score: Score,
    pub time: MatchTime,
    pub kickoff: KickoffState,
    pub rng: StdRng,
}

impl MatchContext {
    pub fn new(mut rng: StdRng) -> Self {
        let opening_team = random_team(&mut rng);

        MatchContext {
            phase: MatchPhase::Kickoff,
            score: Score::default(),
            time: MatchTime::default(),
            kickoff: KickoffState::opening(opening_team),
            rng,
        }
    }

    /// Rolls a fresh restarting team and re-arms the kickoff at the current
    /// match time.
    pub fn begin_kickoff(&mut self) {
        let team = random_team(&mut self.rng);
        self.kickoff.restart(team, self.time.time);
        self.phase = MatchPhase::Kickoff;
    }
}

fn random_team(rng: &mut StdRng) -> Team {
    if rng.random_bool(0.5) {
        Team::Left
    } else {
        Team::Right
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    left: u32,
    right: u32,
}

impl Score {
    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn right(&self) -> u32 {
        self.right
    }

    pub fn add_for(&mut self, team: Team) {
        match team {
            Team::Left => self.left += 1,
            Team::Right => self.right += 1,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MatchTime {
    pub time: u64,
}

impl MatchTime {
    #[inline]
    pub fn increment(&mut self, val: u64) -> u64 {
        self.time += val;
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn match_time_increment() {
        let mut time = MatchTime::default();

        assert_eq!(time.increment(16), 16);
        assert_eq!(time.increment(16), 32);
        assert_eq!(time.time, 32);
    }

    #[test]
    fn score_tracks_each_team_independently() {
        let mut score = Score::default();

        score.add_for(Team::Left);
        score.add_for(Team::Right);
        score.add_for(Team::Right);

        assert_eq!(score.left(), 1);
        assert_eq!(score.right(), 2);
    }

    #[test]
    fn begin_kickoff_resets_phase_and_rearms_the_kickoff() {
        let mut context = MatchContext::new(StdRng::seed_from_u64(11));
        context.phase = MatchPhase::Play;
        context.time.increment(7500);
        context.kickoff.initialized = true;

        context.begin_kickoff();

        assert_eq!(context.phase, MatchPhase::Kickoff);
        assert!(!context.kickoff.initialized);
        assert!(!context.kickoff.first);
        assert_eq!(context.kickoff.started_at, 7500);
    }

    #[test]
    fn seeded_contexts_pick_the_same_opening_team() {
        let a = MatchContext::new(StdRng::seed_from_u64(42));
        let b = MatchContext::new(StdRng::seed_from_u64(42));

        assert_eq!(a.kickoff.team, b.kickoff.team);
    }
}
