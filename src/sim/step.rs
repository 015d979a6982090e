/// The tick body: advances the game by one step.
///
/// Processing order:
///   1. Resolve the relevant paddle from the dot's x (selector side effects)
///   2. Paddle contact: hit → reward, or edge exit → penalty
///   3. Wall bounces on all four edges, independent of step 2
///   4. Move the dot along its (possibly new) heading
///
/// A penalty that drives the score negative ends the game at step 2;
/// the dot does not move on that tick.

use crate::domain::difficulty::Tuning;
use crate::domain::geometry::{collides, Lane, Size};
use crate::domain::heading::{advance, Heading, Horizontal, Vertical};
use crate::domain::paddle::{Feedback, Side};
use crate::domain::score::MissOutcome;
use super::event::GameEvent;
use super::state::{directions_of, GameState, Phase};
use super::surface::Surface;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn tick<S: Surface + ?Sized>(state: &mut GameState, surface: &S, tuning: &Tuning) -> Vec<GameEvent> {
    if state.phase != Phase::Running { return vec![]; }

    let arena = surface.arena();
    let dot_size = match surface.dot_size() {
        Some(s) => s,
        None => {
            tracing::trace!("no dot on surface, tick skipped");
            return vec![];
        }
    };

    let side = state.selector.select(state.dot.pos.x, arena.width, &mut state.paddles);
    let lane = match surface.lane(side) {
        Some(l) => l,
        None => {
            tracing::trace!(?side, "no lane on surface, tick skipped");
            return vec![];
        }
    };

    let mut events = Vec::new();
    state.tick += 1;

    let mut heading = directions_of(&state.dot);
    if resolve_paddle(state, side, lane, arena, dot_size, tuning, &mut heading, &mut events) {
        return events;
    }
    resolve_walls(state, arena, dot_size, &mut heading, &mut events);

    state.dot.heading = Some(heading);
    state.dot.pos = advance(state.dot.pos, state.dot.distance, heading);

    events
}

// ══════════════════════════════════════════════════════════════
// Edge contact
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default)]
struct EdgeContact {
    left: bool,
    right: bool,
    top: bool,
    bottom: bool,
}

fn edge_contact(state: &GameState, arena: Size, dot_size: Size) -> EdgeContact {
    let p = state.dot.pos;
    EdgeContact {
        left: p.x <= 0.0,
        right: p.x + dot_size.width >= arena.width,
        top: p.y <= 0.0,
        bottom: p.y + dot_size.height >= arena.height,
    }
}

// ══════════════════════════════════════════════════════════════
// Paddle: hit or miss
// ══════════════════════════════════════════════════════════════

/// Returns true when the game ended this tick.
#[allow(clippy::too_many_arguments)]
fn resolve_paddle(
    state: &mut GameState,
    side: Side,
    lane: Lane,
    arena: Size,
    dot_size: Size,
    tuning: &Tuning,
    heading: &mut Heading,
    events: &mut Vec<GameEvent>,
) -> bool {
    let rect = state.paddles.get(side).rect(lane);

    if collides(state.dot.pos, rect) {
        state.selector.mark(side, Feedback::Hit, &mut state.paddles);
        state.score.hit(tuning.hit_score);
        tuning.on_hit(&mut state.dot.distance, state.paddles.get_mut(side));

        // Bounce back toward the other paddle; vertical is kept.
        *heading = heading.with_horizontal(match side {
            Side::Left => Horizontal::Right,
            Side::Right => Horizontal::Left,
        });

        events.push(GameEvent::Hit { side, score: state.score.score });
        return false;
    }

    state.selector.mark(side, Feedback::Miss, &mut state.paddles);

    let edges = edge_contact(state, arena, dot_size);
    if !(edges.left || edges.right) {
        return false;
    }

    match state.score.miss() {
        MissOutcome::Over => {
            state.phase = Phase::Over;
            events.push(GameEvent::GameOver {
                score: state.score.score,
                highest: state.score.highest,
            });
            true
        }
        MissOutcome::Penalised => {
            tuning.on_miss(&mut state.dot.distance, state.paddles.get_mut(side));
            events.push(GameEvent::Miss { side, score: state.score.score });
            false
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Walls: always turn the dot back toward the interior
// ══════════════════════════════════════════════════════════════

fn resolve_walls(
    state: &GameState,
    arena: Size,
    dot_size: Size,
    heading: &mut Heading,
    events: &mut Vec<GameEvent>,
) {
    let edges = edge_contact(state, arena, dot_size);

    if edges.left {
        *heading = heading.with_horizontal(Horizontal::Right);
    } else if edges.right {
        *heading = heading.with_horizontal(Horizontal::Left);
    }

    if edges.top {
        *heading = heading.with_vertical(Vertical::Down);
        events.push(GameEvent::WallBounce);
    } else if edges.bottom {
        *heading = heading.with_vertical(Vertical::Up);
        events.push(GameEvent::WallBounce);
    }
}
