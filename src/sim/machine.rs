/// The game state machine: Running ⇄ Paused, Running → Over → Running.
///
/// `Game` owns the `GameState`, the tick scheduler and the score store.
/// Input events arrive between ticks and are applied immediately;
/// the frame loop calls `update` to run whatever ticks are due.
///
///   Running --p--> Paused --p--> Running
///   Running --score < 0--> Over --pointer press--> Running
///
/// Leaving Running stops the scheduler and detaches pointer routing;
/// entering Running restarts both.

use std::time::Instant;

use crate::domain::difficulty::Tuning;
use crate::domain::paddle;
use super::event::GameEvent;
use super::scheduler::TickScheduler;
use super::state::{GameState, Phase};
use super::step;
use super::store::{ScoreStore, HIGHEST_SCORE};
use super::surface::Surface;

/// Input the core understands. Coordinates are arena units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f64, y: f64 },
    PointerPress,
    Key(char),
}

pub struct Game<St: ScoreStore> {
    pub state: GameState,
    tuning: Tuning,
    scheduler: TickScheduler,
    store: St,
    pointer_attached: bool,
    best_display: i64,
}

impl<St: ScoreStore> Game<St> {
    pub fn new<S: Surface + ?Sized>(
        surface: &S,
        tuning: Tuning,
        mut scheduler: TickScheduler,
        store: St,
        now: Instant,
    ) -> Self {
        let state = GameState::new(surface.arena(), &tuning);
        let best_display = store.get(HIGHEST_SCORE).unwrap_or(0);
        scheduler.start(now);
        tracing::info!(best = best_display, "new session");
        Game {
            state,
            tuning,
            scheduler,
            store,
            pointer_attached: true,
            best_display,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// High score shown on screen: the persisted value as of the last
    /// startup, game over, or reset.
    pub fn best_display(&self) -> i64 {
        self.best_display
    }

    #[cfg(test)]
    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    // ── Input routing ──

    pub fn handle<S: Surface + ?Sized>(
        &mut self,
        input: InputEvent,
        surface: &S,
        now: Instant,
    ) -> Vec<GameEvent> {
        match input {
            InputEvent::PointerMove { x, y } => {
                self.move_paddle(x, y, surface);
                vec![]
            }
            InputEvent::Key(c) if c.eq_ignore_ascii_case(&'p') => self.toggle_pause(now),
            InputEvent::Key(_) => vec![],
            InputEvent::PointerPress => self.reset(surface, now),
        }
    }

    fn move_paddle<S: Surface + ?Sized>(&mut self, x: f64, y: f64, surface: &S) {
        if !self.pointer_attached || self.state.phase != Phase::Running {
            return;
        }
        let arena = surface.arena();
        let side = self.state.selector.select(x, arena.width, &mut self.state.paddles);
        paddle::move_stick(self.state.paddles.get_mut(side), y, arena.height);
    }

    pub fn toggle_pause(&mut self, now: Instant) -> Vec<GameEvent> {
        match self.state.phase {
            Phase::Over => vec![],
            Phase::Running => {
                self.state.phase = Phase::Paused;
                self.scheduler.stop();
                self.pointer_attached = false;
                tracing::info!(tick = self.state.tick, "paused");
                vec![GameEvent::Paused]
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                self.scheduler.start(now);
                self.pointer_attached = true;
                tracing::info!(tick = self.state.tick, "resumed");
                vec![GameEvent::Resumed]
            }
        }
    }

    /// Start a new game. Does nothing unless the current game is over.
    pub fn reset<S: Surface + ?Sized>(&mut self, surface: &S, now: Instant) -> Vec<GameEvent> {
        if self.state.phase != Phase::Over {
            return vec![];
        }
        self.state.restart(surface.arena(), &self.tuning);
        self.best_display = self.store.get(HIGHEST_SCORE).unwrap_or(0);
        self.scheduler.start(now);
        self.pointer_attached = true;
        tracing::info!(best = self.best_display, "new game");
        vec![GameEvent::Restarted]
    }

    // ── Ticking ──

    /// Run every tick the scheduler says is due at `now`.
    pub fn update<S: Surface + ?Sized>(&mut self, now: Instant, surface: &S) -> Vec<GameEvent> {
        let due = self.scheduler.due(now);
        self.run_ticks(due, surface)
    }

    /// Run up to `n` ticks without consulting the clock. Stops early if
    /// the game leaves Running.
    pub fn run_ticks<S: Surface + ?Sized>(&mut self, n: u32, surface: &S) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.scheduler.is_running() {
            return events;
        }
        for _ in 0..n {
            if self.state.phase != Phase::Running {
                break;
            }
            let produced = step::tick(&mut self.state, surface, &self.tuning);
            for e in &produced {
                log_event(e);
            }
            events.extend(produced);
            if self.state.phase == Phase::Over {
                self.end_game();
                break;
            }
        }
        events
    }

    fn end_game(&mut self) {
        self.scheduler.stop();
        self.pointer_attached = false;

        let saved = self.store.get(HIGHEST_SCORE).unwrap_or(0);
        let highest = self.state.score.highest;
        if highest > saved {
            match self.store.set(HIGHEST_SCORE, highest) {
                Ok(()) => tracing::info!(highest, previous = saved, "new high score saved"),
                Err(e) => tracing::warn!("high score not saved: {e}"),
            }
        }
        self.best_display = self.store.get(HIGHEST_SCORE).unwrap_or(0);
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Hit { side, score } => tracing::debug!(?side, score, "hit"),
        GameEvent::Miss { side, score } => tracing::debug!(?side, score, "miss"),
        GameEvent::WallBounce => tracing::trace!("wall bounce"),
        GameEvent::GameOver { score, highest } => tracing::info!(score, highest, "game over"),
        GameEvent::Paused | GameEvent::Resumed | GameEvent::Restarted => {}
    }
}
