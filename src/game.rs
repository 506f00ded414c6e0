use crate::achievements::{self, Achievement};
use crate::catalog::{Sentence, SENTENCE_COUNT};
use crate::config::clamp_countdown;
use crate::cue::{Cue, CueSink};
use crate::dice::Dice;
use crate::session::{block_offset, GameSession, Phase, TowerBlock};
use crate::skin::{Backdrop, InitialBlock};
use crate::store::{self, ScoreStore, HIGH_SCORE_KEY, SCORE_KEY};

/// Tower heights that trigger the `ascend` cue.
pub const ASCEND_HEIGHTS: [usize; 5] = [6, 11, 16, 21, 26];

/// Combo value that triggers the `maxCombo` cue.
pub const MAX_COMBO: u32 = 16;

/// Result of opening the achievements panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementActivation {
    pub list: Vec<Achievement>,
    /// Ids unlocked by this activation.
    pub unlocked_now: Vec<usize>,
}

/// The game session state machine.
///
/// Every transition runs to completion on the caller's thread. Random
/// choices are drawn from `D` in a fixed order so a scripted `Dice` fully
/// determines a run:
/// - `new`: initial block, backdrop
/// - `start_game`, `replay_game`, `confirm_quit`: backdrop, initial block,
///   sentence
/// - each completed sentence: next sentence
#[derive(Debug)]
pub struct Game<S, C, D> {
    session: GameSession,
    countdown_setting: u32,
    store: S,
    cues: C,
    dice: D,
}

impl<S: ScoreStore, C: CueSink, D: Dice> Game<S, C, D> {
    pub fn new(store: S, cues: C, mut dice: D, countdown_secs: u32) -> Self {
        let countdown = clamp_countdown(countdown_secs);
        let high_score = store::load_high_score(&store);
        let initial_block = InitialBlock::roll(&mut dice);
        let backdrop = Backdrop::roll(&mut dice);
        tracing::debug!(high_score, countdown, "game created");
        Self {
            session: GameSession {
                countdown_remaining: countdown,
                countdown_configured: countdown,
                high_score,
                initial_block,
                backdrop,
                ..GameSession::default()
            },
            countdown_setting: countdown,
            store,
            cues,
            dice,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn cues_mut(&mut self) -> &mut C {
        &mut self.cues
    }

    /// Countdown the next session will use.
    pub fn countdown_setting(&self) -> u32 {
        self.countdown_setting
    }

    /// Change the countdown for the next session. Returns the clamped value.
    pub fn set_countdown(&mut self, secs: u32) -> u32 {
        self.countdown_setting = clamp_countdown(secs);
        tracing::info!(countdown = self.countdown_setting, "countdown configured");
        self.countdown_setting
    }

    /// Idle/Over -> Running with a fresh session.
    pub fn start_game(&mut self) {
        if self.session.phase == Phase::Running {
            tracing::debug!("start_game ignored: already running");
            return;
        }
        self.reroll_cosmetics();
        let s = &mut self.session;
        s.phase = Phase::Running;
        s.paused = false;
        s.input.clear();
        s.accuracy = 0.0;
        s.combo = 0;
        s.score = 0;
        s.total_score = 0;
        s.tower.clear();
        s.countdown_configured = self.countdown_setting;
        s.countdown_remaining = self.countdown_setting;
        tracing::info!(
            countdown = s.countdown_remaining,
            sentence = s.sentence().text,
            "game started"
        );
        self.emit(Cue::StartGame);
    }

    /// One second elapsed.
    pub fn on_tick(&mut self) {
        let s = &mut self.session;
        if s.phase != Phase::Running || s.paused || s.countdown_remaining == 0 {
            return;
        }
        s.countdown_remaining -= 1;
        if s.countdown_remaining == 0 {
            self.end_game();
        }
    }

    /// The text field changed to `new_input`.
    pub fn on_input_changed(&mut self, new_input: &str) {
        if self.session.phase != Phase::Running {
            return;
        }
        self.session.input = new_input.to_string();

        let target = self.session.sentence();
        let len = target.len();
        if len == 0 {
            return;
        }

        let mut matched = 0;
        for (typed, expected) in new_input.chars().take(len).zip(target.text.chars()) {
            if typed != expected {
                self.session.combo = 0;
                self.session.accuracy = matched as f64 / len as f64;
                self.emit(Cue::ComboBroken);
                return;
            }
            matched += 1;
        }
        self.session.accuracy = matched as f64 / len as f64;

        if matched == len {
            self.complete_sentence(target);
        }
    }

    fn complete_sentence(&mut self, completed: Sentence) {
        let s = &mut self.session;
        s.score += s.combo + 1;
        s.combo += 1;
        let combo = s.combo;

        // Only the last block is compared, so a sentence that comes back
        // later still gets its own block.
        let fresh = s
            .tower
            .last()
            .map_or(true, |block| block.sentence.text != completed.text);
        if fresh {
            let offset = block_offset(s.tower.len());
            s.tower.push(TowerBlock {
                sentence: completed,
                offset,
            });
        } else {
            tracing::debug!(sentence = completed.text, "duplicate block skipped");
        }
        let height = s.tower.len();

        s.sentence_index = self.dice.roll(SENTENCE_COUNT);
        s.input.clear();
        let score = s.score;
        tracing::debug!(score, combo, height, "sentence completed");

        self.emit(Cue::IncreaseCombo);
        if combo == MAX_COMBO {
            self.emit(Cue::MaxCombo);
        }
        if fresh && ASCEND_HEIGHTS.contains(&height) {
            self.emit(Cue::Ascend);
        }

        store::save_int(&mut self.store, SCORE_KEY, score);
        if score > self.session.high_score {
            self.session.high_score = score;
            store::save_int(&mut self.store, HIGH_SCORE_KEY, score);
        }
    }

    /// Running -> Over. Freezes the total score.
    pub fn end_game(&mut self) {
        if self.session.phase != Phase::Running {
            return;
        }
        let s = &mut self.session;
        s.total_score = s.score + s.tower.len() as u32;
        s.phase = Phase::Over;
        s.paused = false;
        let (total, high) = (s.total_score, s.high_score);
        tracing::info!(
            score = s.score,
            tower = s.tower.len(),
            total,
            high,
            "game over"
        );
        if total > high {
            self.emit(Cue::HighScore);
        }
    }

    /// Over/Idle -> Idle, folding the total into the high score.
    ///
    /// Combo, score and total survive as the last result so the
    /// achievements panel can evaluate them.
    pub fn replay_game(&mut self) {
        if self.session.phase == Phase::Running {
            tracing::debug!("replay_game ignored: game still running");
            return;
        }
        if self.session.total_score > self.session.high_score {
            self.session.high_score = self.session.total_score;
            store::save_int(&mut self.store, HIGH_SCORE_KEY, self.session.high_score);
            tracing::info!(high = self.session.high_score, "new high score saved");
        }
        self.reset_to_idle();
    }

    /// Open the quit confirmation: the countdown stops, the phase stays.
    pub fn request_quit(&mut self) {
        if self.session.phase == Phase::Running {
            self.session.paused = true;
        }
    }

    /// Dismiss the quit confirmation and resume the countdown.
    pub fn cancel_quit(&mut self) {
        if self.session.phase == Phase::Running {
            self.session.paused = false;
        }
    }

    /// Abandon the running session without computing a total. Combo and
    /// score stay as the last result, like after a replay.
    pub fn confirm_quit(&mut self) {
        if self.session.phase != Phase::Running {
            return;
        }
        tracing::info!(score = self.session.score, "game abandoned");
        self.reset_to_idle();
    }

    /// Evaluate and persist achievements against the last result.
    pub fn open_achievements(&mut self) -> AchievementActivation {
        let mut list = store::load_achievements(&self.store);
        let unlocked_now =
            achievements::evaluate(&mut list, self.session.combo, self.session.total_score);
        if !unlocked_now.is_empty() {
            tracing::info!(?unlocked_now, "achievements unlocked");
            if let Err(err) = store::save_achievements(&mut self.store, &list) {
                tracing::warn!(%err, "failed to save achievements");
            }
        }
        AchievementActivation { list, unlocked_now }
    }

    fn reset_to_idle(&mut self) {
        self.reroll_cosmetics();
        let s = &mut self.session;
        s.phase = Phase::Idle;
        s.paused = false;
        s.input.clear();
        s.tower.clear();
        s.countdown_configured = self.countdown_setting;
        s.countdown_remaining = self.countdown_setting;
    }

    fn reroll_cosmetics(&mut self) {
        self.session.backdrop = Backdrop::roll(&mut self.dice);
        self.session.initial_block = InitialBlock::roll(&mut self.dice);
        self.session.sentence_index = self.dice.roll(SENTENCE_COUNT);
    }

    fn emit(&mut self, cue: Cue) {
        if let Err(err) = self.cues.play(cue) {
            tracing::warn!(%cue, %err, "cue dropped");
        }
    }
}
