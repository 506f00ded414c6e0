use crate::catalog::{self, Sentence};
use crate::config::DEFAULT_COUNTDOWN_SECS;
use crate::skin::{Backdrop, InitialBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Over,
}

/// A completed sentence stacked on the tower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerBlock {
    pub sentence: Sentence,
    pub offset: f64,
}

/// Vertical offset for the block appended on top of `height` blocks.
pub fn block_offset(height: usize) -> f64 {
    -100.0 - height as f64 * 60.0
}

/// All mutable gameplay data. Mutated only through `Game`.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) phase: Phase,
    pub(crate) paused: bool,
    pub(crate) sentence_index: usize,
    pub(crate) input: String,
    pub(crate) accuracy: f64,
    pub(crate) combo: u32,
    pub(crate) score: u32,
    pub(crate) total_score: u32,
    pub(crate) tower: Vec<TowerBlock>,
    pub(crate) countdown_remaining: u32,
    pub(crate) countdown_configured: u32,
    pub(crate) high_score: u32,
    pub(crate) initial_block: InitialBlock,
    pub(crate) backdrop: Backdrop,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            paused: false,
            sentence_index: 0,
            input: String::new(),
            accuracy: 0.0,
            combo: 0,
            score: 0,
            total_score: 0,
            tower: Vec::new(),
            countdown_remaining: DEFAULT_COUNTDOWN_SECS,
            countdown_configured: DEFAULT_COUNTDOWN_SECS,
            high_score: 0,
            initial_block: InitialBlock::default(),
            backdrop: Backdrop::default(),
        }
    }
}

impl GameSession {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn sentence_index(&self) -> usize {
        self.sentence_index
    }

    pub fn sentence(&self) -> Sentence {
        catalog::sentence(self.sentence_index)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Fraction of the target matched so far, in [0, 1].
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn tower(&self) -> &[TowerBlock] {
        &self.tower
    }

    pub fn tower_height(&self) -> usize {
        self.tower.len()
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    pub fn countdown_configured(&self) -> u32 {
        self.countdown_configured
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn initial_block(&self) -> InitialBlock {
        self.initial_block
    }

    pub fn backdrop(&self) -> Backdrop {
        self.backdrop
    }

    /// Whether the finished session beat the record. Only meaningful in
    /// `Over`, before `replay_game` folds the total into the high score.
    pub fn is_new_record(&self) -> bool {
        self.phase == Phase::Over && self.total_score > self.high_score
    }

    /// Per-character verdicts of the current input against the target:
    /// `Some(true)` typed correctly, `Some(false)` typed wrong, `None` not
    /// typed yet.
    pub fn marks(&self) -> Vec<Option<bool>> {
        let mut typed = self.input.chars();
        self.sentence()
            .text
            .chars()
            .map(|expected| typed.next().map(|c| c == expected))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_idle() {
        let session = GameSession::default();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.is_running());
        assert!(!session.is_over());
        assert_eq!(session.tower_height(), 0);
        assert_eq!(session.countdown_remaining(), DEFAULT_COUNTDOWN_SECS);
        assert!(!session.is_new_record());
    }

    #[test]
    fn block_offsets_step_upwards() {
        assert_eq!(block_offset(0), -100.0);
        assert_eq!(block_offset(1), -160.0);
        assert_eq!(block_offset(5), -400.0);
    }

    #[test]
    fn marks_compare_char_by_char() {
        let mut session = GameSession::default();
        // index 2 is "Ooh ooh ah"
        session.sentence_index = 2;
        session.input = "Oox".to_string();
        let marks = session.marks();
        assert_eq!(marks.len(), 10);
        assert_eq!(&marks[..4], &[Some(true), Some(true), Some(false), None]);
    }

    #[test]
    fn new_record_needs_over_phase() {
        let mut session = GameSession {
            total_score: 10,
            high_score: 5,
            ..GameSession::default()
        };
        assert!(!session.is_new_record());
        session.phase = Phase::Over;
        assert!(session.is_new_record());
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Running.to_string(), "Running");
    }
}
