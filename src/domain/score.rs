/// Score bookkeeping: current score, escalating miss penalty, session best.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MissOutcome {
    /// Score survived; the penalty has been raised for next time.
    Penalised,
    /// Score went negative. Nothing else changes this tick.
    Over,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: i64,
    pub decrement: i64,
    /// Best score this session. Survives resets, never decreases.
    pub highest: i64,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        ScoreBoard { score: 0, decrement: 1, highest: 0 }
    }
}

impl ScoreBoard {
    pub fn hit(&mut self, increment: i64) {
        self.score += increment;
        if self.score > self.highest {
            self.highest = self.score;
        }
    }

    pub fn miss(&mut self) -> MissOutcome {
        self.score -= self.decrement;
        if self.score < 0 {
            return MissOutcome::Over;
        }
        self.decrement += 1;
        MissOutcome::Penalised
    }

    /// New game: score and penalty start over, session best is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.decrement = 1;
    }
}
