use std::io::{self, Write};

/// Sound cues the rules emit. `Display` yields the cue name a sound
/// dispatcher keys its assets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Cue {
    #[strum(serialize = "startGame")]
    StartGame,
    #[strum(serialize = "comboBroken")]
    ComboBroken,
    #[strum(serialize = "increaseCombo")]
    IncreaseCombo,
    #[strum(serialize = "maxCombo")]
    MaxCombo,
    #[strum(serialize = "ascend")]
    Ascend,
    #[strum(serialize = "highScore")]
    HighScore,
}

impl Cue {
    /// Cues worth interrupting the player for.
    pub fn is_loud(&self) -> bool {
        matches!(self, Cue::MaxCombo | Cue::Ascend | Cue::HighScore)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CueError {
    #[error("failed to play cue: {0}")]
    Io(#[from] io::Error),
}

/// Fire-and-forget cue dispatcher. Errors are reported but the caller
/// never lets them affect game state.
pub trait CueSink {
    fn play(&mut self, cue: Cue) -> Result<(), CueError>;
}

impl<C: CueSink + ?Sized> CueSink for Box<C> {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        (**self).play(cue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn play(&mut self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

/// Keeps every cue in order of emission.
#[derive(Debug, Clone, Default)]
pub struct RecordingCues {
    pub played: Vec<Cue>,
}

impl RecordingCues {
    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }

    pub fn clear(&mut self) {
        self.played.clear();
    }
}

impl CueSink for RecordingCues {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        self.played.push(cue);
        Ok(())
    }
}

/// Terminal rendition of the sound layer: logs every cue and rings the
/// bell for loud ones unless muted.
#[derive(Debug, Clone, Copy)]
pub struct TerminalCues {
    bell: bool,
}

impl TerminalCues {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }
}

impl CueSink for TerminalCues {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        tracing::debug!(%cue, "cue");
        if self.bell && cue.is_loud() {
            let mut out = io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}
