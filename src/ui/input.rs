/// Terminal input: drains crossterm events and turns them into game input.
///
///   mouse move / drag  → `InputEvent::PointerMove` (arena units)
///   any mouse button   → `InputEvent::PointerPress`
///   character key      → `InputEvent::Key`
///   q / Esc / Ctrl+C   → quit request (never reaches the game)
///
/// Events are handed over in arrival order; nothing is coalesced, so the
/// last pointer position of a frame wins.

use std::time::Duration;

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::sim::machine::InputEvent;
use super::layout::TerminalSurface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Translated {
    Game(InputEvent),
    Quit,
}

pub struct InputState {
    events: Vec<InputEvent>,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            events: Vec::with_capacity(16),
            quit: false,
        }
    }

    /// Read all pending terminal events without blocking.
    /// Call this once per frame, before running ticks.
    pub fn drain_events(&mut self, surface: &TerminalSurface) {
        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(ev) => match translate(&ev, surface) {
                    Some(Translated::Game(input)) => self.events.push(input),
                    Some(Translated::Quit) => self.quit = true,
                    None => {}
                },
                Err(e) => {
                    tracing::warn!("terminal event read failed: {e}");
                    break;
                }
            }
        }
    }

    /// Take the events gathered since the last call.
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

pub fn translate(ev: &Event, surface: &TerminalSurface) -> Option<Translated> {
    match ev {
        Event::Mouse(m) => translate_mouse(m, surface).map(Translated::Game),
        Event::Key(k) => translate_key(k),
        _ => None,
    }
}

fn translate_mouse(m: &MouseEvent, surface: &TerminalSurface) -> Option<InputEvent> {
    match m.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let p = surface.to_arena(m.column, m.row);
            Some(InputEvent::PointerMove { x: p.x, y: p.y })
        }
        MouseEventKind::Down(_) => Some(InputEvent::PointerPress),
        _ => None,
    }
}

fn translate_key(k: &KeyEvent) -> Option<Translated> {
    // Windows reports releases too; only presses count.
    if k.kind == KeyEventKind::Release {
        return None;
    }
    if k.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(k.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(Translated::Quit);
    }
    match k.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Translated::Quit),
        KeyCode::Char(c) => Some(Translated::Game(InputEvent::Key(c))),
        _ => None,
    }
}
