/// Events emitted by ticks and phase transitions.
/// The presentation layer consumes these for sound; the machine logs them.

use crate::domain::paddle::Side;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Hit { side: Side, score: i64 },
    Miss { side: Side, score: i64 },
    WallBounce,
    GameOver { score: i64, highest: i64 },
    Paused,
    Resumed,
    Restarted,
}
