/// GameState: everything the simulation mutates, in one place.
///
/// Owned by the state machine (`sim::machine::Game`) and handed explicitly
/// to the tick body. Nothing here touches the terminal.

use crate::domain::difficulty::Tuning;
use crate::domain::geometry::{Point, Size};
use crate::domain::heading::Heading;
use crate::domain::paddle::{PaddleSelector, Paddles};
use crate::domain::score::ScoreBoard;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Paused,
    Over,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub pos: Point,
    /// `None` means the heading was lost; `directions_of` recovers it.
    pub heading: Option<Heading>,
    pub distance: f64,
}

impl Dot {
    pub fn centered(arena: Size, distance: f64) -> Self {
        Dot { pos: arena.center(), heading: Some(Heading::default()), distance }
    }
}

/// Read the dot's heading, falling back to (down, right) if it was lost.
pub fn directions_of(dot: &Dot) -> Heading {
    match dot.heading {
        Some(h) => h,
        None => {
            tracing::warn!("dot heading missing, defaulting to {}", Heading::default().tag());
            Heading::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    pub dot: Dot,
    pub paddles: Paddles,
    pub selector: PaddleSelector,
    pub score: ScoreBoard,
    pub tick: u64,
}

impl GameState {
    pub fn new(arena: Size, tuning: &Tuning) -> Self {
        GameState {
            phase: Phase::Running,
            dot: Dot::centered(arena, tuning.initial_distance),
            paddles: Paddles::new(tuning.initial_height),
            selector: PaddleSelector::default(),
            score: ScoreBoard::default(),
            tick: 0,
        }
    }

    /// Put everything back to a fresh game. Session best and the active
    /// paddle are left alone.
    pub fn restart(&mut self, arena: Size, tuning: &Tuning) {
        self.phase = Phase::Running;
        self.dot = Dot::centered(arena, tuning.initial_distance);
        for p in [&mut self.paddles.left, &mut self.paddles.right] {
            p.height = tuning.initial_height;
            p.y = 0.0;
        }
        self.score.reset();
        self.tick = 0;
    }
}
