use crate::agent::Team;
use crate::context::MatchContext;
use crate::field::MatchField;
use crate::state::MatchPhase;
use log::{debug, info};

/// Something notable that happened during a tick. Events are collected
/// while the tick runs and applied in order afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    /// The ball crossed a goal line inside the goal band; `Team` is the
    /// scoring side.
    Goal(Team),
    /// A goalkeeper intercepted a goal-bound ball.
    Save(u32),
    /// The ball left the field outside the goal bands.
    OutOfBounds,
    /// An agent took possession of a free ball.
    Claimed(u32),
}

#[derive(Default)]
pub struct EventCollection {
    events: Vec<MatchEvent>,
}

impl EventCollection {
    pub fn new() -> Self {
        EventCollection { events: Vec::new() }
    }

    pub fn add(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_vec(self) -> Vec<MatchEvent> {
        self.events
    }
}

pub struct EventDispatcher;

impl EventDispatcher {
    /// Applies each event's consequences to the field and context.
    pub fn dispatch(
        events: Vec<MatchEvent>,
        field: &mut MatchField,
        context: &mut MatchContext,
    ) {
        for event in events {
            debug!("match event: {:?}", event);

            match event {
                MatchEvent::Goal(team) => {
                    context.score.add_for(team);
                    info!(
                        "goal for {:?}, score {}:{}",
                        team,
                        context.score.left(),
                        context.score.right()
                    );

                    field.reset_positions();
                    context.begin_kickoff();
                }
                MatchEvent::Save(keeper) => {
                    info!("save by keeper {}", keeper);

                    field.grant_possession(keeper);
                    context.phase = MatchPhase::Play;
                }
                MatchEvent::OutOfBounds => {
                    context.phase = MatchPhase::Out;

                    field.reset_positions();
                    context.begin_kickoff();
                }
                MatchEvent::Claimed(_) => {}
            }
        }
    }
}
