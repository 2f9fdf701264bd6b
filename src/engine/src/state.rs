use crate::agent::Team;

/// The Right team auto-releases its kickoff ball after this long.
pub const RIGHT_KICKOFF_DELAY_MS: u64 = 2000;
/// A Left-team kickoff that sees no action key for this long starts play
/// anyway.
pub const LEFT_KICKOFF_TIMEOUT_MS: u64 = 5000;
/// Velocity of the Right team's automatic kickoff release.
pub const KICKOFF_RELEASE_VELOCITY: (f32, f32) = (2.0, 1.0);

/// Coarse match phase. `Out` is a transient marker raised while an
/// out-of-bounds event is being handled; by the end of that tick the phase
/// is `Kickoff` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Kickoff,
    Play,
    Out,
}

/// Tracks who restarts play and when the current kickoff began.
#[derive(Debug, Clone, Copy)]
pub struct KickoffState {
    pub team: Team,
    pub started_at: u64,
    /// Set once the kickoff ball has been granted to a restarting agent.
    pub initialized: bool,
    /// True only for the opening kickoff of the match.
    pub first: bool,
}

impl KickoffState {
    pub fn opening(team: Team) -> Self {
        KickoffState {
            team,
            started_at: 0,
            initialized: false,
            first: true,
        }
    }

    pub fn restart(&mut self, team: Team, now: u64) {
        self.team = team;
        self.started_at = now;
        self.initialized = false;
        self.first = false;
    }

    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.started_at)
    }
}
